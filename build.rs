//! Build script for UGM
//!
//! Keeps a monotonically increasing build number in build_number.txt and
//! embeds it, with a timestamp, into the binary.

use std::fs;
use std::path::Path;

fn main() {
    // Rerun on source changes only, not on every cargo invocation
    println!("cargo:rerun-if-changed=src");

    let counter_file = Path::new("build_number.txt");

    let previous: u64 = fs::read_to_string(counter_file)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let build_number = previous + 1;

    fs::write(counter_file, build_number.to_string())
        .expect("Failed to write build number file");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=UGM_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=UGM_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:warning=UGM Build #{} at {}", build_number, timestamp);
}
