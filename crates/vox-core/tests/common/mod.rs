pub mod clip_server;
