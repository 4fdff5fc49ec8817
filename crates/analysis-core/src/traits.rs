use crate::DocumentText;

/// Trait for the document analysis engines.
///
/// Implementations are pure: the same document always yields the same output,
/// and no state is shared between calls, so one engine can serve any number of
/// concurrent requests.
pub trait DocumentAnalyzer: Send + Sync {
    type Output;

    fn analyze(&self, document: &DocumentText) -> Self::Output;
}
