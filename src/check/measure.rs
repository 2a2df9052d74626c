//! Coercion of raw ini setting text into numbers, sizes, flags and lists.
//!
//! Settings arrive as free-form text. None of these helpers can fail: text
//! that does not look like the expected shape falls back to the natural
//! zero value (`0`, `false`, empty list), which the rules then treat as the
//! unfavourable case.

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Convert a size setting such as `"128M"` into bytes.
///
/// The unit is taken from the last character of the trimmed value only
/// (`K`, `M`, `G`, case-insensitive). Values without a recognised suffix are
/// plain bytes. A negative value (`"-1"`) stays negative and means
/// "unlimited" to the callers.
///
/// ```
/// use cmsprobe::check::measure::parse_size_bytes;
///
/// assert_eq!(parse_size_bytes("10M"), 10 * 1024 * 1024);
/// assert_eq!(parse_size_bytes(" 512 "), 512);
/// assert_eq!(parse_size_bytes("-1"), -1);
/// ```
pub fn parse_size_bytes(value: &str) -> i64 {
    let trimmed = value.trim();
    let multiplier = match trimmed.chars().last() {
        Some('g' | 'G') => GIB,
        Some('m' | 'M') => MIB,
        Some('k' | 'K') => KIB,
        _ => 1.0,
    };
    (leading_float(trimmed) * multiplier) as i64
}

/// Render a byte count the way thresholds are quoted in titles (`"32MB"`).
pub fn format_size(bytes: i64) -> String {
    let exact = |unit: i64| bytes != 0 && bytes % unit == 0;
    if exact(GIB as i64) {
        format!("{}GB", bytes / GIB as i64)
    } else if exact(MIB as i64) {
        format!("{}MB", bytes / MIB as i64)
    } else if exact(KIB as i64) {
        format!("{}KB", bytes / KIB as i64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Leading integer of a setting (`"30"`, `"30s"`, `" -1"`); anything else is 0.
pub fn parse_number(value: &str) -> i64 {
    let trimmed = value.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }
    match digits[..end].parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    }
}

/// Interpret a boolean setting.
///
/// Returns `None` for text that is neither a recognised truthy nor falsy
/// spelling; callers treat that as "not enabled".
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Whether a boolean setting is switched on.
pub fn is_enabled(value: &str) -> bool {
    parse_flag(value) == Some(true)
}

/// Loose truthiness: recognised spellings as in [`parse_flag`], any other
/// non-empty text counts as on.
pub fn is_truthy(value: &str) -> bool {
    parse_flag(value).unwrap_or(true)
}

/// Split a list setting, trimming entries and dropping empty ones.
pub fn split_list<P>(value: &str, is_delimiter: P) -> Vec<&str>
where
    P: Fn(char) -> bool,
{
    value
        .split(is_delimiter)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

fn leading_float(text: &str) -> f64 {
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut seen_digit = false;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return 0.0;
    }
    text[..end].parse().unwrap_or(0.0)
}
