use serde::{Deserialize, Serialize};

/// Plain text of a document, as ordered page segments.
///
/// Produced by whatever decoded the upload; the analysis engines only borrow it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentText {
    pages: Vec<String>,
}

impl DocumentText {
    pub fn from_pages(pages: Vec<String>) -> Self {
        Self { pages }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            pages: vec![text.into()],
        }
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages joined with newlines.
    pub fn full_text(&self) -> String {
        self.pages.join("\n")
    }

    /// Full text with every whitespace run collapsed to a single space.
    pub fn normalized(&self) -> String {
        normalize_whitespace(&self.full_text())
    }

    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|p| p.trim().is_empty())
    }
}

impl From<&str> for DocumentText {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for DocumentText {
    fn from(text: String) -> Self {
        Self::from_text(text)
    }
}

/// Collapse all runs of whitespace (newlines included) to single spaces and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
