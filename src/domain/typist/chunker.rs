//! Pure chunk planning for paced message reveal.
//!
//! Splitting is purely presentational: the session log always holds whole
//! messages, and the planner never mutates anything.

/// Reference maximum chunk length, in characters.
pub const DEFAULT_CHUNK_LIMIT: usize = 200;

/// Splits `text` into display chunks of at most `limit` characters.
///
/// Each cut prefers the nearest sentence terminator (`.`) at or before the
/// limit, then the nearest whitespace, then a hard cut at the limit.
/// Inter-chunk whitespace is swallowed; the concatenated chunks preserve all
/// visible content.
pub fn plan_chunks(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let remaining = chars.len() - start;
        if remaining <= limit {
            chunks.push(chars[start..].iter().collect());
            break;
        }

        let window = &chars[start..start + limit];
        let cut = window
            .iter()
            .rposition(|c| *c == '.')
            .map(|pos| pos + 1)
            .or_else(|| window.iter().rposition(|c| c.is_whitespace()))
            .unwrap_or(limit);
        // A cut of zero would never make progress.
        let cut = cut.max(1);

        chunks.push(chars[start..start + cut].iter().collect());
        start += cut;

        while start < chars.len() && chars[start].is_whitespace() {
            start += 1;
        }
    }

    chunks
}
