/// Reply keyboards
pub mod keyboards;
/// Reply delivery with automatic retry
pub mod resilient;
/// Dispatch schema and message endpoint
pub mod router;

pub use router::{schema, session_distribution, session_key, BotDialogue};
