//! Compact byte counts for display

const UNITS: [&str; 5] = ["", "KB", "MB", "GB", "TB"];

/// Formats a byte count as an integer plus unit suffix
///
/// The value is shifted right by 10 bits while it is at least 1024, at most
/// four times. Each shift truncates, so 1500 bytes prints as `1KB`.
pub fn readable_size(size: u64) -> String {
    let mut value = size;
    let mut divs = 0;

    while value >= 1024 && divs < UNITS.len() - 1 {
        value >>= 10;
        divs += 1;
    }

    format!("{}{}", value, UNITS[divs])
}
