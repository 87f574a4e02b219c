use events_errors::ValidationErrors;

use crate::{EventForm, ImageUpload, ValidatedEvent};

/// Full replacement of an event's fields. Without a new image the stored
/// one is kept.
#[derive(Debug, Clone, Default)]
pub struct UpdateEventCommand {
    pub event_id: i64,
    pub form: EventForm,
    pub image: Option<ImageUpload>,
}

impl UpdateEventCommand {
    pub fn new(event_id: i64, form: EventForm, image: Option<ImageUpload>) -> Self {
        Self {
            event_id,
            form,
            image,
        }
    }

    pub fn validate(self) -> Result<ValidatedEvent, ValidationErrors> {
        self.form.validate(self.image)
    }
}
