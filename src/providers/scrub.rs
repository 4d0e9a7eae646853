use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;
const REDACTED: &str = "[REDACTED]";

/// Google API keys and OAuth tokens, matched by prefix.
const PREFIX_PATTERNS: [&str; 2] = ["AIza", "ya29."];

/// Markers followed by a secret value. `key=` covers the query parameter
/// that reqwest echoes back in transport errors.
const MARKER_PATTERNS: [&str; 5] = [
    "key=",
    "access_token=",
    "Authorization: Bearer ",
    "\"api_key\":\"",
    "\"access_token\":\"",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    input[from..]
        .char_indices()
        .find(|&(_, c)| !is_secret_char(c))
        .map_or(input.len(), |(i, _)| from + i)
}

/// Replace the token following every occurrence of `marker`. Prefix
/// patterns are redacted together with the prefix itself.
fn redact_after(scrubbed: &mut String, marker: &str, keep_marker: bool) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let value_start = start + marker.len();
        let end = token_end(scrubbed, value_start);

        if end == value_start || scrubbed[value_start..end].starts_with(REDACTED) {
            search_from = value_start;
            continue;
        }

        let replace_from = if keep_marker { value_start } else { start };
        scrubbed.replace_range(replace_from..end, REDACTED);
        search_from = replace_from + REDACTED.len();
    }
}

/// Scrub API keys and tokens from text that is about to be logged.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    let needs_scrubbing = PREFIX_PATTERNS
        .iter()
        .chain(MARKER_PATTERNS.iter())
        .any(|pattern| input.contains(pattern));
    if !needs_scrubbing {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in MARKER_PATTERNS {
        redact_after(&mut scrubbed, marker, true);
    }
    for prefix in PREFIX_PATTERNS {
        redact_after(&mut scrubbed, prefix, false);
    }
    Cow::Owned(scrubbed)
}

/// Scrub secrets and truncate an API error body.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);
    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed.into_owned();
    }

    let truncated: String = scrubbed.chars().take(MAX_API_ERROR_CHARS).collect();
    format!("{truncated}...")
}

/// Build a sanitized error from a failed HTTP response.
pub async fn api_error(provider: &str, response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());
    anyhow::anyhow!("{provider} API error ({status}): {}", sanitize_api_error(&body))
}
