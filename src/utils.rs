/*!
 * Utility functions for codedigest
 */

use std::path::Path;

/// Format a human-readable file size in binary units
///
/// Bytes are shown as an integer, larger units with one decimal.
pub fn format_file_size(size: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if size < 1024 {
        return format!("{} B", size);
    }

    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", value, UNITS[unit])
}

/// Directory key for a relative path: `.` for the root, `/`-joined otherwise
pub fn relative_dir_key(rel_dir: &Path) -> String {
    let parts: Vec<String> = rel_dir
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .filter(|part| part != ".")
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Shorten a name for single-line display, keeping its tail
pub fn truncate_display(name: &str, max_len: usize) -> String {
    let count = name.chars().count();
    if count <= max_len {
        return name.to_string();
    }
    let tail: String = name.chars().skip(count - max_len.saturating_sub(3)).collect();
    format!("...{}", tail)
}
