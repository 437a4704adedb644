mod build;
mod entry;
mod load;

pub use build::{BuildRegistry, BuildRegistryError, DirectoryEntry};
pub use entry::{Registry, RegistryEntry};
pub use load::{LoadRegistry, LoadRegistryError};
