use serde::{Deserialize, Serialize};

use crate::linkify::linkify;

/// A run of rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Segment {
    /// Plain text.
    Text(String),

    /// An `http://` or `https://` link.
    Link(String),
}

impl Segment {
    /// Returns the text of the segment.
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Text(text) | Segment::Link(text) => text,
        }
    }

    /// Returns true if this segment is a link.
    pub fn is_link(&self) -> bool {
        matches!(self, Segment::Link(_))
    }
}

/// Renderable output of a transcript entry: the text and its linkified form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryContent {
    text: String,
    segments: Vec<Segment>,
}

impl EntryContent {
    /// Creates content from text, detecting links.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let segments = linkify(&text);
        Self { text, segments }
    }

    /// Returns the plain text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the text split into plain and link segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true if the content holds at least one link.
    pub fn has_links(&self) -> bool {
        self.segments.iter().any(Segment::is_link)
    }
}

/// One line of terminal history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// What the user typed; empty for output-only entries.
    pub input: String,

    /// What the terminal printed in response, if anything.
    pub output: Option<EntryContent>,

    /// True while the entry is still being typed out.
    pub in_progress: bool,
}

impl TranscriptEntry {
    /// An entry holding submitted user text.
    pub fn user(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: None,
            in_progress: false,
        }
    }

    /// A finished output-only entry.
    pub fn output(text: impl Into<String>) -> Self {
        Self {
            input: String::new(),
            output: Some(EntryContent::new(text)),
            in_progress: false,
        }
    }

    /// An output-only entry that will keep changing.
    pub fn streaming(text: impl Into<String>) -> Self {
        Self {
            in_progress: true,
            ..Self::output(text)
        }
    }

    /// Returns the output text, or the empty string.
    pub fn output_text(&self) -> &str {
        self.output.as_ref().map(EntryContent::text).unwrap_or("")
    }
}
