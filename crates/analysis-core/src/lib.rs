pub mod document;
pub mod error;
pub mod stats;
pub mod traits;
pub mod types;
pub mod vocabulary;

pub use document::*;
pub use error::*;
pub use traits::*;
pub use types::*;
pub use vocabulary::{KeywordTable, Vocabulary};
