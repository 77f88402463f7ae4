pub mod config;
pub mod protocol;
pub mod router;
pub mod session;
pub mod transport;
pub mod workspace;

// Re-export main types for convenience
pub use config::Config;
pub use protocol::{HostMessage, UiMessage};
pub use router::route;
pub use session::{ChatSession, Message, Role};
pub use transport::CompletionClient;
