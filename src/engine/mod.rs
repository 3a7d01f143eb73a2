mod coordinator;
pub mod report;
mod scoring;
mod snapshot;

pub use coordinator::Engine;
pub use snapshot::{EngineSnapshot, LogLevel, Notification};
