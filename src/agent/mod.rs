//! Assistant session, chat-model seam and the interactive dialog loop.

pub mod loop_;
pub mod model;
pub mod session;
pub mod system_prompt;

pub use loop_::{run_dialog, DialogEnd};
pub use model::ChatModel;
pub use session::{Assistant, AssistantSession, SessionSettings};
