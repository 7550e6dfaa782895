//! Port traits defining external boundaries.
//!
//! Each trait is a seam between the migration core and something it does not
//! control: wall-clock time, the disk, and the language model behind the
//! planning and documentation collaborators. Implementations live in
//! `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod llm;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmFuture};

/// Boxed error type returned by port methods.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
