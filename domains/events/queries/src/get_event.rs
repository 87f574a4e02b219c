use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GetEventQuery {
    pub event_id: i64,
}

impl GetEventQuery {
    pub fn new(event_id: i64) -> Self { Self { event_id } }
}
