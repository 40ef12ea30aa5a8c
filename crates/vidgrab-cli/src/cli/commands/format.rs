//! Human-readable sizes and bitrates for listings.

/// `1536` → `"1.5 KB"`, `0` → `"0 B"`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// Bits per second as kbps below 1 Mbps, Mbps with one decimal above.
pub fn format_bitrate(bps: u64) -> String {
    let kbps = bps as f64 / 1000.0;
    if kbps >= 1000.0 {
        format!("{:.1} Mbps", kbps / 1000.0)
    } else {
        format!("{} kbps", kbps.round() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(250 * 1024 * 1024), "250 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024 * 1024), "3072 GB");
    }

    #[test]
    fn bitrate() {
        assert_eq!(format_bitrate(800_000), "800 kbps");
        assert_eq!(format_bitrate(5_000_000), "5.0 Mbps");
        assert_eq!(format_bitrate(2_560_000), "2.6 Mbps");
    }
}
