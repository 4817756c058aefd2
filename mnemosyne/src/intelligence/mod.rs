pub mod classifier;
pub mod contradiction;
pub mod revision;
pub mod utils;

pub use classifier::{Classification, MemoryClassifier};
pub use contradiction::ContradictionDetector;
pub use revision::RevisionDetector;
