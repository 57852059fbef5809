pub mod engine;
pub mod types;

pub use engine::ApprovalTriage;
pub use types::*;
