mod write_file;

pub use write_file::{stage_file, write_file, WriteFileError};
