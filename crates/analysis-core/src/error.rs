use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Vocabulary file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Vocabulary parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
