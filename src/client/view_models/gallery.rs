//! # Gallery Draft and Upload Sequencing
//!
//! Every file-bearing form edits a gallery draft: an ordered run of
//! already-persisted URLs (edit mode) followed by not-yet-uploaded local
//! images. Submitting resolves the draft — all pending uploads run
//! concurrently, and the final URL sequence preserves selection order.
//! Previews are scoped resources: acquired when a file is picked,
//! released when it is replaced, removed, or the draft goes away.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::client::error::UploadError;
use crate::client::services::image_store::{ImageStore, LocalImage};

/// Locally materialized preview for a picked file. Dropping the handle
/// releases the underlying resource; renderers hold a [`PreviewWatch`]
/// to know when a thumbnail can be evicted.
#[derive(Debug)]
pub struct Preview {
    location: String,
    alive: Arc<AtomicBool>,
}

impl Preview {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn watch(&self) -> PreviewWatch {
        PreviewWatch(Arc::clone(&self.alive))
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
        tracing::trace!(location = %self.location, "preview released");
    }
}

/// Observer side of a [`Preview`].
#[derive(Debug, Clone)]
pub struct PreviewWatch(Arc<AtomicBool>);

impl PreviewWatch {
    pub fn is_released(&self) -> bool {
        !self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
struct PendingImage {
    image: LocalImage,
    preview: Preview,
}

/// What a gallery index points at: a persisted URL or a local preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GallerySlot<'a> {
    Persisted(&'a str),
    Pending(&'a str),
}

/// Ordered gallery under edit: persisted URLs first, pending local
/// images after, exactly as they render.
#[derive(Debug, Default)]
pub struct GalleryDraft {
    persisted: Vec<String>,
    pending: Vec<PendingImage>,
}

impl GalleryDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit mode: start from the car's already-persisted gallery.
    pub fn with_persisted(urls: Vec<String>) -> Self {
        Self {
            persisted: urls,
            pending: Vec::new(),
        }
    }

    pub fn persisted(&self) -> &[String] {
        &self.persisted
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn len(&self) -> usize {
        self.persisted.len() + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Queue a picked file; its preview lives until the file is removed
    /// or the draft is cleared.
    pub fn add_file(&mut self, image: LocalImage) {
        let preview = Preview::new(image.filename().to_string());
        self.pending.push(PendingImage { image, preview });
    }

    /// The gallery as it renders: persisted URLs, then local previews.
    pub fn slots(&self) -> Vec<GallerySlot<'_>> {
        self.persisted
            .iter()
            .map(|url| GallerySlot::Persisted(url))
            .chain(
                self.pending
                    .iter()
                    .map(|pending| GallerySlot::Pending(pending.preview.location())),
            )
            .collect()
    }

    /// Remove one gallery entry by display index. An index below the
    /// persisted count removes a persisted URL; past it, the matching
    /// pending file (and its preview) goes. Exactly one list changes.
    pub fn remove(&mut self, index: usize) -> bool {
        if index < self.persisted.len() {
            self.persisted.remove(index);
            return true;
        }
        let pending_index = index - self.persisted.len();
        if pending_index < self.pending.len() {
            self.pending.remove(pending_index);
            return true;
        }
        false
    }

    /// Drop everything, releasing every preview (create-mode reset and
    /// form teardown).
    pub fn clear(&mut self) {
        self.persisted.clear();
        self.pending.clear();
    }

    /// Upload all pending images concurrently and return the combined
    /// URL sequence: persisted first, then uploads in selection order.
    /// Any failed upload fails the whole resolution — the caller must
    /// not run its mutation — but siblings that already uploaded are
    /// not rolled back.
    pub async fn resolve(&self, store: &Arc<dyn ImageStore>) -> Result<Vec<String>, UploadError> {
        let mut handles = Vec::with_capacity(self.pending.len());
        for pending in &self.pending {
            let store = Arc::clone(store);
            let image = pending.image.clone();
            handles.push(tokio::spawn(async move { store.upload(image).await }));
        }

        let mut settled = Vec::with_capacity(handles.len());
        for handle in handles {
            settled.push(handle.await.map_err(|_| UploadError::Interrupted)?);
        }

        let mut urls = self.persisted.clone();
        for outcome in settled {
            urls.push(outcome?);
        }
        Ok(urls)
    }
}

/// Single-image slot for the main listing photo: either a persisted URL
/// or one pending file, never both.
#[derive(Debug, Default)]
pub struct MainImageSlot {
    persisted: Option<String>,
    pending: Option<PendingImage>,
}

impl MainImageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_persisted(url: impl Into<String>) -> Self {
        Self {
            persisted: Some(url.into()),
            pending: None,
        }
    }

    /// Picking a new file supersedes any previous pick, releasing the
    /// old preview.
    pub fn set_file(&mut self, image: LocalImage) {
        let preview = Preview::new(image.filename().to_string());
        self.pending = Some(PendingImage { image, preview });
    }

    /// Remove whatever the slot holds.
    pub fn clear(&mut self) {
        self.persisted = None;
        self.pending = None;
    }

    pub fn is_empty(&self) -> bool {
        self.persisted.is_none() && self.pending.is_none()
    }

    pub fn preview_location(&self) -> Option<&str> {
        self.pending
            .as_ref()
            .map(|pending| pending.preview.location())
            .or(self.persisted.as_deref())
    }

    /// Upload the pending file if there is one, otherwise keep the
    /// persisted URL.
    pub async fn resolve(
        &self,
        store: &Arc<dyn ImageStore>,
    ) -> Result<Option<String>, UploadError> {
        match &self.pending {
            Some(pending) => {
                let url = store.upload(pending.image.clone()).await?;
                Ok(Some(url))
            }
            None => Ok(self.persisted.clone()),
        }
    }
}
