use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::domain::VideoDescriptor;

/// Global assignment that carries the embedded player state.
const STATE_MARKER: &str = "window.__INITIAL_STATE__=";
/// Signature of the statement immediately following the state object.
const STATE_TERMINATOR: &str = ";(function()";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("Video information not found")]
    NotFound,

    #[error("Failed to parse video information: {0}")]
    Parse(String),
}

/// Slice of `text` strictly between `start_marker` and `end_marker`.
fn slice_between<'a>(text: &'a str, start_marker: &str, end_marker: &str) -> Option<&'a str> {
    let start = text.find(start_marker)? + start_marker.len();
    let end = text[start..].find(end_marker)? + start;
    Some(&text[start..end])
}

/// Scan every script block for the state assignment and return the raw JSON
/// text between the two markers.
fn find_state_json(html: &str) -> Option<&str> {
    let script_re = Regex::new(r"(?s)<script[^>]*>(.*?)</script>").ok()?;
    for caps in script_re.captures_iter(html) {
        let script = match caps.get(1) {
            Some(m) => m.as_str(),
            None => continue,
        };
        if !script.contains(STATE_MARKER) {
            continue;
        }
        if let Some(json_text) = slice_between(script, STATE_MARKER, STATE_TERMINATOR) {
            return Some(json_text);
        }
    }
    None
}

/// Recover the video descriptor from raw page markup.
///
/// Pure with respect to its input; missing markers report `NotFound`,
/// while a located but unusable state blob reports `Parse`.
pub fn extract_video_descriptor(html: &str) -> Result<VideoDescriptor, ExtractError> {
    let json_text = find_state_json(html).ok_or(ExtractError::NotFound)?;

    let state: Value =
        serde_json::from_str(json_text).map_err(|e| ExtractError::Parse(e.to_string()))?;

    let title = state["videoData"]["title"]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ExtractError::Parse("missing videoData.title".to_string()))?;

    // cid is numeric on current pages; accept a string form as well.
    let content_id = match &state["videoData"]["cid"] {
        Value::Number(n) => n.to_string(),
        Value::String(s) if !s.is_empty() => s.clone(),
        _ => return Err(ExtractError::Parse("missing videoData.cid".to_string())),
    };

    let video_id = state["bvid"]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ExtractError::Parse("missing bvid".to_string()))?;

    Ok(VideoDescriptor {
        title,
        content_id,
        video_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_state(state: &str) -> String {
        format!(
            "<html><head><script>var unrelated = 1;</script>\
             <script>window.__INITIAL_STATE__={state};(function(){{var s;}}());</script>\
             </head><body></body></html>"
        )
    }

    #[test]
    fn extracts_descriptor_from_embedded_state() {
        let html = page_with_state(
            r#"{"bvid":"BV1xx411c7mD","videoData":{"title":"A Day in the Life","cid":239587450}}"#,
        );
        let descriptor = extract_video_descriptor(&html).unwrap();
        assert_eq!(descriptor.title, "A Day in the Life");
        assert_eq!(descriptor.content_id, "239587450");
        assert_eq!(descriptor.video_id, "BV1xx411c7mD");
    }

    #[test]
    fn accepts_string_content_id() {
        let html = page_with_state(
            r#"{"bvid":"BV1xx411c7mD","videoData":{"title":"t","cid":"239587450"}}"#,
        );
        let descriptor = extract_video_descriptor(&html).unwrap();
        assert_eq!(descriptor.content_id, "239587450");
    }

    #[test]
    fn missing_marker_is_not_found() {
        let html = "<html><script>var a = {};</script></html>";
        assert_eq!(extract_video_descriptor(html), Err(ExtractError::NotFound));
    }

    #[test]
    fn missing_terminator_is_not_found() {
        let html = r#"<html><script>window.__INITIAL_STATE__={"bvid":"BV1"}</script></html>"#;
        assert_eq!(extract_video_descriptor(html), Err(ExtractError::NotFound));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let html = page_with_state("{not json at all");
        assert!(matches!(
            extract_video_descriptor(&html),
            Err(ExtractError::Parse(_))
        ));
    }

    #[test]
    fn missing_fields_are_a_parse_error() {
        let html = page_with_state(r#"{"bvid":"BV1xx411c7mD","videoData":{"title":"t"}}"#);
        assert!(matches!(
            extract_video_descriptor(&html),
            Err(ExtractError::Parse(_))
        ));
    }

    #[test]
    fn slice_between_returns_inner_text() {
        assert_eq!(slice_between("a[x]b", "[", "]"), Some("x"));
        assert_eq!(slice_between("a[x", "[", "]"), None);
        assert_eq!(slice_between("ax]b", "[", "]"), None);
    }
}
