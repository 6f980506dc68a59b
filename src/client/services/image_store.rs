//! # Remote Image Store Adapter
//!
//! Uploads one image and returns its public HTTPS URL. The production
//! adapter posts a multipart form (`file` + `upload_preset`) to the
//! configured cloud endpoint; tests substitute the trait with stubs.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use serde::Deserialize;

use crate::client::error::UploadError;
use crate::config::Config;

/// Type alias for the boxed upload future, so trait signatures stay
/// readable.
pub type UploadFuture<'a> = Pin<Box<dyn Future<Output = Result<String, UploadError>> + Send + 'a>>;

/// An image picked locally but not yet uploaded.
#[derive(Debug, Clone)]
pub struct LocalImage {
    filename: String,
    bytes: Bytes,
}

impl LocalImage {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a picked file from disk.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let bytes = std::fs::read(path)?;
        Ok(Self::new(filename, bytes))
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }
}

/// Upload seam for every file-bearing form.
pub trait ImageStore: Send + Sync + 'static {
    fn upload(&self, image: LocalImage) -> UploadFuture<'_>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

/// Production image store client.
#[derive(Debug, Clone)]
pub struct RemoteImageStore {
    http: reqwest::Client,
    upload_url: String,
    upload_preset: String,
}

impl RemoteImageStore {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            upload_url: config.upload_url(),
            upload_preset: config.upload_preset.clone(),
        }
    }

    async fn upload_inner(&self, image: LocalImage) -> Result<String, UploadError> {
        let LocalImage { filename, bytes } = image;
        tracing::debug!(%filename, size = bytes.len(), "uploading image");

        let part = reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(filename.clone());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .http
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %filename, "image store rejected upload");
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(UploadError::Transport)?;
        match parsed.secure_url {
            Some(url) => {
                tracing::info!(%filename, "image uploaded");
                Ok(url)
            }
            None => Err(UploadError::MissingUrl),
        }
    }
}

impl ImageStore for RemoteImageStore {
    fn upload(&self, image: LocalImage) -> UploadFuture<'_> {
        Box::pin(self.upload_inner(image))
    }
}
