use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    let mut value = bytes as f64;
    let mut unit = 0usize;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

/// Last path segment of a node id, for labels and search rows.
pub fn short_name(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

/// Trimmed display form of a long path id: keeps the last two segments.
pub fn trimmed_id(id: &str) -> String {
    const MAX_LENGTH: usize = 50;

    if id.len() <= MAX_LENGTH {
        return id.to_string();
    }

    let mut parts = id.rsplit('/');
    let last = parts.next().unwrap_or(id);
    match parts.next() {
        Some(second_last) => format!(".../{second_last}/{last}"),
        None => id.to_string(),
    }
}

/// Deterministic jitter direction in [-1, 1]^3 derived from the id, so
/// freshly loaded nodes spread out the same way on every run.
pub fn stable_triple(id: &str) -> (f32, f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0x1f_ffff) as f64 / 0x1f_ffff as f64) as f32;
    let y = (((hash >> 21) & 0x1f_ffff) as f64 / 0x1f_ffff as f64) as f32;
    let z = (((hash >> 42) & 0x1f_ffff) as f64 / 0x1f_ffff as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0, (z * 2.0) - 1.0)
}
