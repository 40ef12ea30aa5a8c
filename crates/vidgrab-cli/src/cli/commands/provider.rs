//! `vidgrab provider <url>` – provider name and canonical URL.

use vidgrab_core::provider::{canonicalize, resolve_provider};

pub fn run_provider(url: &str) {
    match resolve_provider(url) {
        Some(name) => {
            println!("provider:  {name}");
            let canonical = canonicalize(url, Some(name));
            if canonical != url {
                println!("canonical: {canonical}");
            }
        }
        None => println!("No known provider."),
    }
}
