use events_commands::{
    CreateEventCommand, DeleteEventCommand, UpdateEventCommand, ValidatedImage,
};
use events_dao::SharedEventStore;
use events_errors::EventError;
use events_responses::EventResponse;
use file_storage::PublicDisk;
use tracing::{info, instrument, warn};

use crate::EVENT_IMAGE_DIR;

async fn store_image(
    disk: &PublicDisk, image: Option<&ValidatedImage>,
) -> Result<Option<String>, EventError> {
    match image {
        Some(image) => {
            let path = disk
                .store(EVENT_IMAGE_DIR, image.format.extension(), &image.bytes)
                .await?;
            Ok(Some(path))
        }
        None => Ok(None),
    }
}

/// Best-effort removal; a leftover file is logged, never surfaced.
async fn discard_image(disk: &PublicDisk, path: &str) {
    if let Err(err) = disk.delete(path).await {
        warn!(path, error = %err, "Failed to remove stored image");
    }
}

#[derive(Clone)]
pub struct CreateEventHandler {
    store: SharedEventStore,
    disk: PublicDisk,
}

impl CreateEventHandler {
    pub fn new(store: SharedEventStore, disk: PublicDisk) -> Self {
        Self { store, disk }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: CreateEventCommand,
    ) -> Result<EventResponse, EventError> {
        let validated = command.validate()?;
        let image = store_image(&self.disk, validated.image.as_ref()).await?;

        match self.store.create(validated.draft(image.clone())).await {
            Ok(event) => {
                info!(event_id = event.id, "Event created");
                Ok(EventResponse::from_event(event, &self.disk))
            }
            Err(err) => {
                if let Some(path) = image {
                    discard_image(&self.disk, &path).await;
                }
                Err(err)
            }
        }
    }
}

#[derive(Clone)]
pub struct UpdateEventHandler {
    store: SharedEventStore,
    disk: PublicDisk,
}

impl UpdateEventHandler {
    pub fn new(store: SharedEventStore, disk: PublicDisk) -> Self {
        Self { store, disk }
    }

    /// Replaces every field. A new upload supersedes the stored image,
    /// which is deleted once the row is saved.
    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: UpdateEventCommand,
    ) -> Result<EventResponse, EventError> {
        let event_id = command.event_id;
        let existing = self.store.find_by_id(event_id).await?;
        let validated = command.validate()?;

        let uploaded = store_image(&self.disk, validated.image.as_ref()).await?;
        let image = uploaded.clone().or(existing.image.clone());

        let updated = match self.store.update(event_id, validated.draft(image)).await
        {
            Ok(updated) => updated,
            Err(err) => {
                if let Some(path) = uploaded {
                    discard_image(&self.disk, &path).await;
                }
                return Err(err);
            }
        };

        if let (Some(_), Some(old)) = (&uploaded, &existing.image) {
            discard_image(&self.disk, old).await;
        }

        info!(event_id, "Event updated");
        Ok(EventResponse::from_event(updated, &self.disk))
    }
}

#[derive(Clone)]
pub struct DeleteEventHandler {
    store: SharedEventStore,
    disk: PublicDisk,
}

impl DeleteEventHandler {
    pub fn new(store: SharedEventStore, disk: PublicDisk) -> Self {
        Self { store, disk }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: DeleteEventCommand,
    ) -> Result<(), EventError> {
        let deleted = self.store.delete(command.event_id).await?;

        if let Some(image) = &deleted.image {
            discard_image(&self.disk, image).await;
        }

        info!(event_id = deleted.id, "Event deleted");
        Ok(())
    }
}
