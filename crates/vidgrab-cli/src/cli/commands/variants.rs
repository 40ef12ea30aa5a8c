//! `vidgrab variants <url>` – fetch an HLS master playlist and list its variants.

use anyhow::{Context, Result};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use vidgrab_core::config::EngineConfig;
use vidgrab_core::manifest::{fetch_variants, FetchOptions};

use super::format::format_bitrate;

pub async fn run_variants(cfg: &EngineConfig, url: &str) -> Result<()> {
    let opts = FetchOptions::from(&cfg.manifest);
    let variants = fetch_variants(url, opts, Arc::new(AtomicBool::new(false)))
        .await
        .with_context(|| format!("fetch manifest {url}"))?;
    if variants.is_empty() {
        println!("No variants found (not a master playlist?).");
        return Ok(());
    }
    println!("{:<9} {:<10} {:<11} {}", "QUALITY", "RES", "BITRATE", "URL");
    for v in variants {
        println!(
            "{:<9} {:<10} {:<11} {}",
            v.quality.as_str(),
            v.resolution.as_deref().unwrap_or("-"),
            v.bandwidth.map(format_bitrate).unwrap_or_else(|| "-".to_string()),
            v.url
        );
    }
    Ok(())
}
