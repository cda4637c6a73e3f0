//! Render command - fetch an avatar and print it as colored chat lines

use crate::cache::{AvatarCache, AvatarKey};
use crate::cli::args::RenderArgs;
use crate::config::{Config, ConfigManager};
use crate::delivery::{Delivery, TerminalDelivery};
use crate::error::{ChatheadError, ChatheadResult};
use crate::pipeline::{RenderOutcome, RenderPipeline, RenderRequest};
use crate::provider::CraftheadProvider;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Execute the render command
pub async fn execute(args: RenderArgs, config: &Config) -> ChatheadResult<()> {
    let key = AvatarKey::new(normalize_identifier(&args.player), args.size)?;

    let cache_root = if args.no_cache {
        None
    } else {
        args.cache_dir
            .clone()
            .or_else(|| ConfigManager::resolved_cache_dir(config))
    };
    let cache = AvatarCache::open(cache_root).await?;

    let provider = CraftheadProvider::new(
        &config.provider.base_url,
        Duration::from_secs(config.provider.timeout_secs),
    );
    let pipeline = RenderPipeline::new(cache, Arc::new(provider), config.display.page_width);

    let request = RenderRequest::new(key.clone()).with_overlay(args.message, args.center);

    let spinner = fetch_spinner(&key);
    let outcome = pipeline.render(&request).await;
    spinner.finish_and_clear();

    match outcome {
        RenderOutcome::Rendered(lines) => TerminalDelivery.deliver(&lines).await,
        RenderOutcome::Unavailable => Err(ChatheadError::AvatarUnavailable(key.id().to_string())),
    }
}

/// UUIDs in any accepted form are normalized to hyphenated lowercase so the
/// cache key is stable; other identifiers pass through unchanged.
fn normalize_identifier(player: &str) -> String {
    match Uuid::parse_str(player) {
        Ok(uuid) => uuid.hyphenated().to_string(),
        Err(_) => player.to_string(),
    }
}

fn fetch_spinner(key: &AvatarKey) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Rendering head for {}...", key.id()));
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
