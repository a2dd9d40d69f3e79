//! Infrastructure layer for filesystem and environment lookups.

pub mod paths;

pub use paths::{expand_tilde, get_config_file, get_data_dir};
