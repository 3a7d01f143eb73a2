mod log;

pub use log::{truncate_chars, Details, HistoryEntry, HistoryLog, DEFAULT_CAPACITY};
