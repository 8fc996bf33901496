//! CLI for the vox voice-clip fetcher.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vox_core::cache::{store, CacheDb, CacheStore};
use vox_core::config;
use vox_core::registry::CdnRegistry;

use commands::{
    run_clips, run_doctor, run_fetch, run_forget, run_purge, run_sources, run_status, run_use,
};

/// Top-level CLI for the vox voice-clip fetcher.
#[derive(Debug, Parser)]
#[command(name = "vox")]
#[command(about = "vox: CDN-backed voice clip fetcher and cache manager", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List configured CDNs, the selection mode, and the active choice.
    Sources,

    /// Select a CDN by id and persist the choice.
    Use {
        /// CDN identifier from `vox sources`.
        id: String,
    },

    /// Forget the persisted CDN choice.
    Forget,

    /// Fetch a clip by its manifest-relative path (cache-aware, with fallback).
    Fetch {
        /// Relative clip path, e.g. `haruka/01.mp3`.
        path: String,
        /// Try this CDN first for this invocation only.
        #[arg(long, value_name = "ID")]
        cdn: Option<String>,
        /// Copy the clip to this file instead of just printing the cache path.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Ignore any cached copy and re-download.
        #[arg(long)]
        refresh: bool,
    },

    /// Show cache statistics.
    Status,

    /// Remove expired cache entries (default), stale sources, or everything.
    Purge {
        /// Remove every cached clip.
        #[arg(long, conflicts_with = "stale")]
        all: bool,
        /// Remove clips cached from CDNs other than the active one.
        #[arg(long)]
        stale: bool,
    },

    /// Probe remote CDNs: reachability, CORS headers, Range support.
    Doctor {
        /// Probe only this CDN (default: all remote CDNs).
        id: Option<String>,
    },

    /// List clips from the voice manifest.
    Clips {
        /// Only clips for this character.
        #[arg(long)]
        character: Option<String>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config with {} cdn entries", cfg.cdns.len());

        let registry =
            CdnRegistry::from_entries(cfg.cdns.clone()).context("invalid cdn configuration")?;
        let db = CacheDb::open_default().await?;
        let clip_dir = match &cfg.cache.dir {
            Some(dir) => dir.clone(),
            None => store::default_clip_dir()?,
        };
        let cache = CacheStore::new(db, clip_dir, cfg.cache.ttl_days);

        match cli.command {
            CliCommand::Sources => run_sources(&registry, &cache).await?,
            CliCommand::Use { id } => run_use(&registry, &cache, &id).await?,
            CliCommand::Forget => run_forget(&cache).await?,
            CliCommand::Fetch {
                path,
                cdn,
                output,
                refresh,
            } => run_fetch(&cfg, &registry, &cache, &path, cdn.as_deref(), output, refresh).await?,
            CliCommand::Status => run_status(&cache).await?,
            CliCommand::Purge { all, stale } => run_purge(&cache, all, stale).await?,
            CliCommand::Doctor { id } => run_doctor(&cfg, &registry, id.as_deref()).await?,
            CliCommand::Clips { character } => run_clips(&cfg, character.as_deref())?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
