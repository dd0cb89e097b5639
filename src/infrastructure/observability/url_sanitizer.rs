const MAX_VISIBLE_LENGTH: usize = 120;

/// Sanitizes a URL for safe logging. CDN attachment URLs carry signed
/// access parameters in the query string, so the query is never logged.
pub fn sanitize_url(url: &str) -> String {
    let sanitized = match url.split_once('?') {
        Some((base, _)) => format!("{}?[REDACTED]", base),
        None => url.to_string(),
    };

    if sanitized.len() <= MAX_VISIBLE_LENGTH {
        return sanitized;
    }

    let mut cut = MAX_VISIBLE_LENGTH;
    while !sanitized.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}... ({} chars total)", &sanitized[..cut], sanitized.len())
}
