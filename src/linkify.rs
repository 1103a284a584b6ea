//! Hyperlink detection for transcript output.
//!
//! A link is any run of non-whitespace starting with `http://` or `https://`.
//! The transform is pure: linkifying the same text always yields the same
//! segments, so it is safe to recompute on every reveal tick.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Segment;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("URL pattern is valid"));

/// Splits `text` into plain and link segments, in order.
///
/// Empty plain runs are omitted, so concatenating the segments reproduces
/// `text` exactly.
pub fn linkify(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for found in URL_RE.find_iter(text) {
        if found.start() > cursor {
            segments.push(Segment::Text(text[cursor..found.start()].to_string()));
        }
        segments.push(Segment::Link(found.as_str().to_string()));
        cursor = found.end();
    }
    if cursor < text.len() {
        segments.push(Segment::Text(text[cursor..].to_string()));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejoin(segments: &[Segment]) -> String {
        segments.iter().map(Segment::as_str).collect()
    }

    #[test]
    fn plain_text_is_one_segment() {
        assert_eq!(
            linkify("hello there"),
            vec![Segment::Text("hello there".to_string())]
        );
    }

    #[test]
    fn empty_text_has_no_segments() {
        assert!(linkify("").is_empty());
    }

    #[test]
    fn links_split_out() {
        let segments = linkify("resume: https://example.com/cv.pdf and http://a.b/c");
        assert_eq!(
            segments,
            vec![
                Segment::Text("resume: ".to_string()),
                Segment::Link("https://example.com/cv.pdf".to_string()),
                Segment::Text(" and ".to_string()),
                Segment::Link("http://a.b/c".to_string()),
            ]
        );
    }

    #[test]
    fn link_ends_at_whitespace() {
        let segments = linkify("https://x.io\nnext");
        assert_eq!(segments[0], Segment::Link("https://x.io".to_string()));
        assert_eq!(segments[1], Segment::Text("\nnext".to_string()));
    }

    #[test]
    fn partial_scheme_is_not_a_link() {
        assert_eq!(linkify("go to http:"), vec![Segment::Text("go to http:".to_string())]);
        assert!(linkify("go to http://").iter().all(|s| !s.is_link()));
    }

    #[test]
    fn idempotent_and_lossless() {
        let text = "a https://é.example/ü b ftp://no";
        let once = linkify(text);
        assert_eq!(once, linkify(text));
        assert_eq!(rejoin(&once), text);
        assert_eq!(linkify(&rejoin(&once)), once);
    }
}
