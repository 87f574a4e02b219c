use events_errors::ValidationErrors;

use crate::{EventForm, ImageUpload, ValidatedEvent};

#[derive(Debug, Clone, Default)]
pub struct CreateEventCommand {
    pub form: EventForm,
    pub image: Option<ImageUpload>,
}

impl CreateEventCommand {
    pub fn new(form: EventForm, image: Option<ImageUpload>) -> Self {
        Self { form, image }
    }

    pub fn validate(self) -> Result<ValidatedEvent, ValidationErrors> {
        self.form.validate(self.image)
    }
}
