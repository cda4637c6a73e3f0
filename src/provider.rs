//! Remote avatar provider abstraction
//!
//! Providers return a decoded [`Raster`] of exactly the requested square
//! dimension. The HTTP implementation talks to a crafthead-style endpoint:
//! `<base_url>/<id>/<size>` returns PNG bytes at that dimension.

use crate::error::{ChatheadError, ChatheadResult};
use crate::raster::Raster;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Abstract source of avatar rasters
///
/// Implementations must return a raster whose dimension equals the
/// requested size; anything else is a fetch failure.
#[async_trait]
pub trait AvatarProvider: Send + Sync {
    /// Fetch the avatar for `id` at exactly `size x size` pixels
    async fn fetch(&self, id: &str, size: u32) -> ChatheadResult<Raster>;

    /// Human-readable provider name for diagnostics
    fn provider_name(&self) -> &'static str;
}

/// Build the request URL for an identifier and size
fn avatar_url(base_url: &str, id: &str, size: u32) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), id, size)
}

/// HTTP avatar provider backed by `ureq`
///
/// The blocking HTTP call runs in `tokio::task::spawn_blocking` so it never
/// occupies the async runtime. The agent carries a bounded global timeout;
/// a hung remote fails the fetch instead of blocking a render forever.
pub struct CraftheadProvider {
    base_url: String,
    agent: ureq::Agent,
}

impl CraftheadProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();

        Self {
            base_url: base_url.into(),
            agent: config.new_agent(),
        }
    }
}

#[async_trait]
impl AvatarProvider for CraftheadProvider {
    async fn fetch(&self, id: &str, size: u32) -> ChatheadResult<Raster> {
        let url = avatar_url(&self.base_url, id, size);
        debug!("Fetching avatar from {}", url);

        let agent = self.agent.clone();
        let fetch_url = url.clone();
        let bytes = tokio::task::spawn_blocking(move || -> ChatheadResult<Vec<u8>> {
            let mut response = agent
                .get(&fetch_url)
                .call()
                .map_err(|e| ChatheadError::fetch(&fetch_url, e.to_string()))?;
            response
                .body_mut()
                .read_to_vec()
                .map_err(|e| ChatheadError::fetch(&fetch_url, e.to_string()))
        })
        .await
        .map_err(|e| ChatheadError::Internal(format!("fetch task failed: {}", e)))??;

        let raster = Raster::decode_png(&bytes)?;
        if raster.size() != size {
            return Err(ChatheadError::fetch(
                &url,
                format!(
                    "provider returned a {}px image for requested size {}",
                    raster.size(),
                    size
                ),
            ));
        }

        Ok(raster)
    }

    fn provider_name(&self) -> &'static str {
        "crafthead"
    }
}
