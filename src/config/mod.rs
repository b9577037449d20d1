//! Project configuration loaded from `.cookiedeck.toml`.

pub mod settings;

pub use settings::Settings;
