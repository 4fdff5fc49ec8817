//! PDF to page text.
//!
//! Decoding is CPU-bound and the underlying parser can panic on hostile
//! input, so it always runs on the blocking pool and panics surface as
//! [`ApiError::UnreadableDocument`].

use analysis_core::DocumentText;

use crate::error::ApiError;

const FORM_FEED: char = '\u{c}';

/// Split decoded text into pages on form feeds, dropping the empty tail.
pub fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text
        .split(FORM_FEED)
        .map(|page| page.replace("\n\n", "\n"))
        .collect();
    while pages.last().is_some_and(|p| p.trim().is_empty()) && pages.len() > 1 {
        pages.pop();
    }
    pages
}

pub fn extract_document(bytes: &[u8]) -> Result<DocumentText, ApiError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ApiError::UnreadableDocument(e.to_string()))?;
    Ok(DocumentText::from_pages(split_pages(&text)))
}

pub async fn load_document(bytes: Vec<u8>) -> Result<DocumentText, ApiError> {
    let size = bytes.len();
    let document = tokio::task::spawn_blocking(move || extract_document(&bytes))
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "PDF decoder panicked");
            ApiError::UnreadableDocument("document could not be decoded".to_string())
        })??;

    tracing::info!(
        size_kb = %format!("{:.1}", size as f64 / 1024.0),
        pages = document.page_count(),
        "PDF decoded"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_on_form_feed() {
        let pages = split_pages("Revenue 100\n\nprofit 10\u{c}debt 5\u{c}\n");
        assert_eq!(pages, vec!["Revenue 100\nprofit 10".to_string(), "debt 5".to_string()]);
    }

    #[test]
    fn test_split_pages_single_page() {
        assert_eq!(split_pages("just text"), vec!["just text".to_string()]);
        assert_eq!(split_pages(""), vec![String::new()]);
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_unreadable() {
        let result = load_document(b"definitely not a pdf".to_vec()).await;
        assert!(matches!(result, Err(ApiError::UnreadableDocument(_))));
    }
}
