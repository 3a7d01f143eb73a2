mod settings;
mod store;

pub use settings::Settings;
pub use store::SettingsStore;
