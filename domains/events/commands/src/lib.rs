pub mod create_event;
pub mod delete_event;
pub mod form;
pub mod image;
pub mod update_event;

pub use create_event::*;
pub use delete_event::*;
pub use form::{EventForm, ValidatedEvent};
pub use image::{ImageFormat, ImageUpload, MAX_IMAGE_BYTES, ValidatedImage};
pub use update_event::*;
