mod common;
pub mod external;
pub mod local;

pub use external::ExternalChatClient;
pub use local::LocalBackendClient;
