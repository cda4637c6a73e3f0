//! Fetch-or-cache render pipeline
//!
//! Orchestrates a render request: consult the cache, fetch on a miss, store
//! best-effort, then transform the raster into styled lines with the
//! caller's overlay text merged in.
//!
//! The pipeline is best-effort and silent on failure: every I/O problem is
//! logged where it happens and absorbed into [`RenderOutcome::Unavailable`].
//! A missing avatar is cosmetic, never an error the caller has to handle.

use crate::cache::{AvatarCache, AvatarKey};
use crate::provider::AvatarProvider;
use crate::raster::Raster;
use crate::style::{center_text, parse_legacy, Segment, StyledLine};
use std::sync::Arc;
use tracing::{debug, warn};

/// One render call: the key plus the overlay message to merge in
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub key: AvatarKey,
    /// Message lines appended to pixel rows by index; entries beyond the
    /// last row are dropped
    pub overlay: Vec<String>,
    /// Center overlay lines against the remaining page width
    pub centered: bool,
}

impl RenderRequest {
    pub fn new(key: AvatarKey) -> Self {
        Self {
            key,
            overlay: Vec::new(),
            centered: false,
        }
    }

    pub fn with_overlay(mut self, overlay: Vec<String>, centered: bool) -> Self {
        self.overlay = overlay;
        self.centered = centered;
        self
    }
}

/// Result of a render: either the full line sequence or nothing.
///
/// `Unavailable` is a success-empty value, not an error; the underlying
/// failure was already reported at the fetch layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(Vec<StyledLine>),
    Unavailable,
}

impl RenderOutcome {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// The rendered lines; empty when unavailable
    pub fn lines(&self) -> &[StyledLine] {
        match self {
            Self::Rendered(lines) => lines,
            Self::Unavailable => &[],
        }
    }
}

/// The fetch-or-cache render pipeline
///
/// Context-agnostic: callers decide where `render` runs. The blocking work
/// (disk and network) happens inside the cache and provider, both of which
/// keep it off the async runtime.
pub struct RenderPipeline {
    cache: AvatarCache,
    provider: Arc<dyn AvatarProvider>,
    page_width: usize,
}

impl RenderPipeline {
    pub fn new(cache: AvatarCache, provider: Arc<dyn AvatarProvider>, page_width: usize) -> Self {
        Self {
            cache,
            provider,
            page_width,
        }
    }

    /// Resolve a key to a raster: cache first, then the provider.
    ///
    /// A fetch failure yields `None` after logging. A store failure is also
    /// only logged; the freshly fetched raster is still returned, so the
    /// caller gets a valid render this one time even if persistence failed.
    pub async fn get_or_fetch(&self, key: &AvatarKey) -> Option<Raster> {
        if let Some(raster) = self.cache.try_load(key).await {
            return Some(raster);
        }

        debug!(
            "Cache miss for {}, fetching from {}",
            key.file_name(),
            self.provider.provider_name()
        );

        match self.provider.fetch(key.id(), key.size()).await {
            Ok(raster) => {
                if let Err(e) = self.cache.store(key, &raster).await {
                    warn!("Failed to cache avatar {}: {}", key.file_name(), e);
                }
                Some(raster)
            }
            Err(e) => {
                warn!("Avatar fetch failed for {}: {}", key.file_name(), e);
                None
            }
        }
    }

    /// Render a request into styled lines.
    ///
    /// Produces exactly `size` lines in top-to-bottom row order, each with
    /// `size` left-to-right glyph segments and at most one text segment, or
    /// `Unavailable` when no raster could be resolved.
    pub async fn render(&self, request: &RenderRequest) -> RenderOutcome {
        match self.get_or_fetch(&request.key).await {
            Some(raster) => RenderOutcome::Rendered(self.render_raster(
                &raster,
                &request.overlay,
                request.centered,
            )),
            None => RenderOutcome::Unavailable,
        }
    }

    /// Pure raster-to-lines transform
    fn render_raster(&self, raster: &Raster, overlay: &[String], centered: bool) -> Vec<StyledLine> {
        let size = raster.size();
        let mut lines = Vec::with_capacity(size as usize);

        for y in 0..size {
            let mut segments: Vec<Segment> = (0..size)
                .map(|x| Segment::Glyph(raster.pixel(x, y)))
                .collect();

            // Empty overlay entries add nothing visible; skip them so the
            // row stays glyph-only.
            if let Some(entry) = overlay.get(y as usize).filter(|e| !e.is_empty()) {
                let text = if centered {
                    center_text(entry, self.page_width.saturating_sub(size as usize))
                } else {
                    entry.clone()
                };

                let spans = parse_legacy(&text);
                if !spans.is_empty() {
                    segments.push(Segment::Text(spans));
                }
            }

            lines.push(StyledLine { segments });
        }

        lines
    }
}
