use std::fmt;

use bytes::Bytes;
use events_errors::ValidationErrors;

/// Upper bound for an uploaded image, 2048 KiB.
pub const MAX_IMAGE_BYTES: usize = 2048 * 1024;

const FIELD: &str = "image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
}

impl ImageFormat {
    /// Identifies the format from the file signature.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        }
        else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageFormat::Png)
        }
        else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        }
        else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
        }
    }
}

/// A file received from a multipart form.
#[derive(Clone, Default)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedImage {
    pub format: ImageFormat,
    pub bytes: Bytes,
}

impl fmt::Debug for ValidatedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedImage")
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    fn declared_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"))
    }

    /// Checks type, accepted formats and size, adding messages under
    /// `image`. The format is taken from the bytes, not the file name.
    pub fn validate(self, errors: &mut ValidationErrors) -> Option<ValidatedImage> {
        let format = ImageFormat::sniff(&self.bytes);

        match format {
            None if !self.declared_image() => {
                errors.add(FIELD, "File harus berupa gambar.");
            }
            None => {
                errors.add(FIELD, "Gambar harus berformat jpeg, png, jpg, atau gif.");
            }
            Some(_) => {}
        }

        if self.bytes.len() > MAX_IMAGE_BYTES {
            errors.add(FIELD, "Ukuran gambar maksimal 2MB.");
            return None;
        }

        format.map(|format| {
            ValidatedImage {
                format,
                bytes: self.bytes,
            }
        })
    }
}
