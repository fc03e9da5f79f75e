pub mod store;

pub use store::{ConfigStore, LocalConfig, DEFAULT_REPOSITORY_URL};
