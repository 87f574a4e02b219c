use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::{StatusCode, header::CONTENT_TYPE},
};
use common_errors::AppError;
use events_commands::{EventForm, ImageUpload};
use tracing::debug;

/// Largest request body the event form accepts. Room for a 2 MiB image
/// plus the text fields; the image limit itself is enforced by validation.
pub const MAX_EVENT_BODY_BYTES: usize = 4 * 1024 * 1024;

const IMAGE_FIELD: &str = "image";

/// Body of the create and update endpoints. Accepts `multipart/form-data`
/// (with an optional `image` file part), JSON or a urlencoded form.
#[derive(Debug, Default)]
pub struct EventPayload {
    pub form: EventForm,
    pub image: Option<ImageUpload>,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let mut errors = common_errors::FieldErrors::new();
        errors.insert(IMAGE_FIELD.to_string(), vec![
            "Ukuran gambar maksimal 2MB.".to_string(),
        ]);
        return AppError::validation(errors);
    }
    AppError::bad_request_with_details(
        "INVALID_MULTIPART",
        "Malformed multipart body",
        &err.body_text(),
    )
}

impl EventPayload {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut payload = EventPayload::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == IMAGE_FIELD {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;

                // Browsers send an empty part when no file was chosen.
                if !bytes.is_empty() {
                    payload.image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                continue;
            }

            let value = field.text().await.map_err(multipart_error)?;
            let form = &mut payload.form;
            let slot = match name.as_str() {
                "name" => &mut form.name,
                "start_datetime" => &mut form.start_datetime,
                "end_datetime" => &mut form.end_datetime,
                "video_link" => &mut form.video_link,
                "web_link" => &mut form.web_link,
                "category" => &mut form.category,
                other => {
                    debug!(field = other, "Ignoring unknown form field");
                    continue;
                }
            };
            *slot = Some(value);
        }

        Ok(payload)
    }
}

impl<S> FromRequest<S> for EventPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state).await.map_err(|e| {
                AppError::bad_request_with_details(
                    "INVALID_MULTIPART",
                    "Malformed multipart body",
                    &e.body_text(),
                )
            })?;
            Self::from_multipart(multipart).await
        }
        else if content_type.starts_with("application/json") {
            let Json(form) = Json::<EventForm>::from_request(req, state)
                .await
                .map_err(|e| {
                    AppError::bad_request_with_details(
                        "INVALID_JSON",
                        "Malformed JSON body",
                        &e.body_text(),
                    )
                })?;
            Ok(EventPayload { form, image: None })
        }
        else {
            let Form(form) = Form::<EventForm>::from_request(req, state)
                .await
                .map_err(|e| {
                    AppError::bad_request_with_details(
                        "INVALID_FORM",
                        "Expected a multipart, JSON or urlencoded body",
                        &e.body_text(),
                    )
                })?;
            Ok(EventPayload { form, image: None })
        }
    }
}
