use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DeleteEventCommand {
    pub event_id: i64,
}
