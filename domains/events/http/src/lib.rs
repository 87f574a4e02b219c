pub mod extract;
pub mod handlers;
pub mod payload;
pub mod stats;

pub use extract::{ApiPath, ApiQuery};
pub use handlers::*;
pub use payload::{EventPayload, MAX_EVENT_BODY_BYTES};
pub use stats::*;
