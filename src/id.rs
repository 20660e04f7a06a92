//! ID generation utilities for Officina
//!
//! Job ids only need to be unique and stable once assigned; the scheduler never
//! interprets them.

use rand::Rng;

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Generate a unique job ID
///
/// Format: `{timestamp_ms}-{random_hex}`
/// Example: `1755504000123-a1b2c3d4`
pub fn generate_job_id() -> String {
    let timestamp = now_ms();
    let random: u32 = rand::rng().random();
    format!("{}-{:08x}", timestamp, random)
}
