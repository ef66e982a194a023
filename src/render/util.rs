//! Formatting helpers for card content.

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with binary units and at most one decimal.
///
/// A trailing `.0` is dropped.
///
/// # Example
///
/// ```rust
/// use mediacard::format_size;
///
/// assert_eq!(format_size(2_621_440), "2.5 MB");
/// assert_eq!(format_size(1_048_576), "1 MB");
/// assert_eq!(format_size(512), "512 B");
/// ```
pub fn format_size(bytes: u64) -> String {
    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < SIZE_UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }
    if unit == 0 {
        return format!("{} B", bytes);
    }

    let tenths = (bytes as f64 / scale as f64 * 10.0).round() as u64;
    if tenths % 10 == 0 {
        format!("{} {}", tenths / 10, SIZE_UNITS[unit])
    } else {
        format!("{}.{} {}", tenths / 10, tenths % 10, SIZE_UNITS[unit])
    }
}

/// Returns the uppercased extension of the last path segment of `location`.
///
/// Query strings and fragments are ignored. Returns `None` when the segment
/// has no extension.
pub fn file_extension(location: &str) -> Option<String> {
    let path = location.split(['?', '#']).next().unwrap_or_default();
    let file_name = path.rsplit('/').next().unwrap_or_default();
    let (stem, extension) = file_name.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_uppercase())
}

/// Returns the uppercased subtype of a MIME type, e.g. `PDF` for `application/pdf`.
pub fn mime_label(mime_type: &str) -> Option<String> {
    let subtype = mime_type.split(';').next()?.split('/').nth(1)?.trim();
    if subtype.is_empty() {
        return None;
    }
    Some(subtype.to_ascii_uppercase())
}
