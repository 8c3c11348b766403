mod settings;

pub use settings::{IntakeSettings, Settings};
