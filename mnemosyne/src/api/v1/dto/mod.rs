pub mod analytics;
pub mod memories;
pub mod query;

pub use analytics::*;
pub use memories::*;
pub use query::*;
