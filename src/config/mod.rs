pub mod settings;

pub use settings::{Config, ConfigFile, Overrides, load_config_file};
