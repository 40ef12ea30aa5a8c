//! `vidgrab classify <url> [-H "Name: value"]...` – run the classifier on one URL.

use anyhow::{bail, Result};
use vidgrab_core::classify::{Classifier, Verdict};
use vidgrab_core::config::EngineConfig;
use vidgrab_core::exchange::ResponseHeaders;

use super::format::format_bytes;

pub fn run_classify(cfg: &EngineConfig, url: &str, header_lines: &[String]) -> Result<()> {
    for line in header_lines {
        if !line.contains(':') {
            bail!("header must look like \"Name: value\": {line}");
        }
    }
    let headers = ResponseHeaders::parse_lines(header_lines);
    let headers = (!headers.is_empty()).then_some(headers);

    let classifier = Classifier::new(&cfg.classifier);
    match classifier.classify(url, headers.as_ref()) {
        Verdict::Accept(d) => {
            println!("accepted: {}", d.resource_type);
            println!("  url:       {}", d.url);
            if let Some(original) = &d.original_url {
                println!("  observed:  {original}");
            }
            println!("  container: {}", d.container_format);
            println!("  quality:   {}", d.quality);
            if let Some(size) = d.byte_size {
                println!("  size:      {}", format_bytes(size));
            }
            if let Some(provider) = &d.provider {
                println!("  provider:  {provider}");
            }
            println!("  origin:    {}", d.origin);
        }
        Verdict::Reject { rule } => println!("rejected by {rule}"),
    }
    Ok(())
}
