pub mod analytics;
mod memory;
pub mod session;

pub use analytics::{build_belief_graph, build_timeline};
pub use memory::{AnswerResponse, IngestRequest, IngestSummary, MemoryService, EMPTY_STORE_ANSWER};
pub use session::{run_thinking_session, SessionRange, ThinkingSession};
