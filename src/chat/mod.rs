pub mod reply;
pub mod session;

pub use reply::extract_reply_text;
pub use session::{ChatSession, SubmitOutcome};
