use regex::{Regex, RegexBuilder};

use crate::Result;

const FENCE: &str = "```";

/// Outcome of searching an issue body for a fenced payload block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extraction<'a> {
    /// Text between the fence header and the closing fence.
    Found(&'a str),
    Miss,
}

/// Builds the pattern matching a block fenced with the payload type, and the marker if
/// one is given, on its opening line.
pub fn payload_pattern(payload: &str, marker: Option<&str>) -> Result<Regex> {
    let payload = regex::escape(&payload.to_lowercase());
    let header = match marker.filter(|m| !m.is_empty()) {
        Some(marker) => format!(r"{payload}[^\n]*{}", regex::escape(marker)),
        None => payload,
    };
    let pattern = format!("{FENCE}{header}(.*?){FENCE}");
    tracing::debug!("payload pattern: '{pattern}'");

    Ok(RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .multi_line(true)
        .dot_matches_new_line(true)
        .build()?)
}

/// Returns the content of the first matching block in `body`.
pub fn extract<'a>(payload: &str, marker: Option<&str>, body: &'a str) -> Result<Extraction<'a>> {
    let pattern = payload_pattern(payload, marker)?;
    Ok(match pattern.captures(body).and_then(|c| c.get(1)) {
        Some(m) => Extraction::Found(m.as_str()),
        None => Extraction::Miss,
    })
}
