//! `vidgrab scan-har <path>` – replay a HAR capture and list detected media.

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use vidgrab_core::catalog::{CatalogEntry, CatalogFilter, FormatFamily};
use vidgrab_core::config::EngineConfig;
use vidgrab_core::engine::Engine;
use vidgrab_core::exchange::ContextId;
use vidgrab_core::har;

use super::format::format_bytes;

#[derive(Debug, Default)]
pub struct ScanHarArgs {
    pub json: bool,
    pub family: Option<String>,
    pub quality: Option<String>,
}

impl ScanHarArgs {
    fn filter(&self) -> Result<CatalogFilter> {
        let mut filter = CatalogFilter::default();
        if let Some(family) = &self.family {
            let family: FormatFamily = family.parse().map_err(|e: String| anyhow!(e))?;
            filter = filter.family(family);
        }
        if let Some(quality) = &self.quality {
            filter = filter.quality(quality);
        }
        Ok(filter)
    }
}

pub fn run_scan_har(cfg: &EngineConfig, path: &Path, args: &ScanHarArgs) -> Result<()> {
    let filter = args.filter()?;
    let engine = Engine::new(cfg.clone());
    let ctx = ContextId::new("har");
    let summary = har::replay_har(path, &engine, &ctx)?;
    let entries = engine.list_filtered(&ctx, &filter);

    if args.json {
        let out = serde_json::to_string_pretty(&entries).context("serialize catalog")?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "{} entries replayed, {} media found",
        summary.entries,
        engine.count(&ctx)
    );
    if entries.is_empty() {
        if !filter.is_empty() && engine.count(&ctx) > 0 {
            println!("No media matches the filter.");
        }
        return Ok(());
    }
    print_table(&entries);
    Ok(())
}

fn print_table(entries: &[CatalogEntry]) {
    println!(
        "{:<4} {:<14} {:<9} {:<10} {:<12} {}",
        "ID", "TYPE", "QUALITY", "SIZE", "PROVIDER", "URL"
    );
    for e in entries {
        let d = &e.descriptor;
        let size = d.byte_size.map(format_bytes).unwrap_or_else(|| "-".to_string());
        println!(
            "{:<4} {:<14} {:<9} {:<10} {:<12} {}",
            e.id,
            d.resource_type.to_string(),
            d.quality.as_str(),
            size,
            d.provider.as_deref().unwrap_or("-"),
            d.url
        );
    }
}
