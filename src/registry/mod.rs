mod config;
pub mod constants;

pub use config::{project_stem, Registry, RegistryError, Repository};
