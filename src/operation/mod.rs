mod catalog;
mod registry;

pub use registry::{Category, Locale, Operation, OperationRegistry};
