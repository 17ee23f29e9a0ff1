pub mod sa;
pub mod search;

pub use sa::{SaAlgorithm, SuffixArray, SuffixArrayBuilder};
pub use search::SuffixIndex;
