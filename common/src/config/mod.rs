mod format;
mod source;
mod store;

pub use format::{ConfigFormat, YamlFormat};
pub use source::{ConfigSource, FileSource, MemorySource};
pub use store::ConfigStore;

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
