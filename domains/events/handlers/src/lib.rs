mod commands;
mod queries;

pub use commands::*;
pub use queries::*;

/// Directory under the public disk that holds event images.
pub const EVENT_IMAGE_DIR: &str = "events";
