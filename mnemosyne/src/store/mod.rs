pub mod backends;
pub mod traits;

pub use backends::json::{validate_records, JsonFileStore};
pub use backends::memory::InMemoryStore;
pub use traits::*;
