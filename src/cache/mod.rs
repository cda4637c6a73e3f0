//! Persistent avatar cache
//!
//! Maps an [`AvatarKey`] to a [`Raster`] through one PNG file per key,
//! named `<id>_<size>.png` under a configured root. Entries are written
//! once and never evicted: avatars rarely change and staleness is an
//! accepted tradeoff.
//!
//! A cache with no root configured is disabled: every lookup is a miss and
//! every store is a successful no-op, so callers can't tell "disabled" from
//! "not cached yet".

use crate::error::{ChatheadError, ChatheadResult};
use crate::raster::Raster;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// Identity of a cache entry: opaque identifier plus edge length.
///
/// Two keys are equal iff both fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvatarKey {
    id: String,
    size: u32,
}

impl AvatarKey {
    /// Build a key, validating both fields.
    ///
    /// The size must be positive and the identifier must be non-empty and
    /// safe to embed in a file name. Validation happens here, before any
    /// I/O is attempted.
    pub fn new(id: impl Into<String>, size: u32) -> ChatheadResult<Self> {
        let id = id.into();

        if size == 0 {
            return Err(ChatheadError::InvalidSize(size));
        }

        if id.is_empty()
            || !id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ChatheadError::InvalidIdentifier(id));
        }

        Ok(Self { id, size })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Stable, collision-free storage name for this key
    pub fn file_name(&self) -> String {
        format!("{}_{}.png", self.id, self.size)
    }
}

/// Disk-backed avatar cache; never touches the network
pub struct AvatarCache {
    root: Option<PathBuf>,
}

impl AvatarCache {
    /// Open a cache rooted at `root`, creating the directory if missing.
    ///
    /// `None` opens a disabled cache.
    pub async fn open(root: Option<PathBuf>) -> ChatheadResult<Self> {
        if let Some(ref dir) = root {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| ChatheadError::CacheDirCreate {
                    path: dir.clone(),
                    source: e,
                })?;
        }
        Ok(Self { root })
    }

    /// Whether a storage root is configured
    pub fn is_enabled(&self) -> bool {
        self.root.is_some()
    }

    /// Storage path for a key, or `None` when the cache is disabled
    pub fn entry_path(&self, key: &AvatarKey) -> Option<PathBuf> {
        self.root.as_ref().map(|root| root.join(key.file_name()))
    }

    /// Look up a cached raster.
    ///
    /// Absent, unreadable, undecodable and wrongly-sized entries all report
    /// a miss: a bad entry is disposable and the caller falls through to a
    /// re-fetch that overwrites it.
    pub async fn try_load(&self, key: &AvatarKey) -> Option<Raster> {
        let path = self.entry_path(key)?;

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                debug!("Failed to read cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        let raster = match Raster::decode_png(&bytes) {
            Ok(raster) => raster,
            Err(e) => {
                debug!("Corrupt cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        if raster.size() != key.size() {
            debug!(
                "Cache entry {} is {}px, expected {}px",
                path.display(),
                raster.size(),
                key.size()
            );
            return None;
        }

        debug!("Cache hit for {}", key.file_name());
        Some(raster)
    }

    /// Persist a raster for a key.
    ///
    /// Writes to a temporary sibling and renames it into place so a
    /// concurrent reader sees either no entry or a complete one. A no-op
    /// when the cache is disabled.
    pub async fn store(&self, key: &AvatarKey, raster: &Raster) -> ChatheadResult<()> {
        let Some(path) = self.entry_path(key) else {
            return Ok(());
        };

        let bytes = raster.encode_png()?;

        let tmp = path.with_extension(format!("png.tmp{}", std::process::id()));
        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| ChatheadError::io(format!("writing cache entry {}", tmp.display()), e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| ChatheadError::io(format!("renaming cache entry {}", path.display()), e))?;

        debug!("Cached avatar {}", key.file_name());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Rgb;
    use tempfile::TempDir;

    fn checker(size: u32) -> Raster {
        let pixels = (0..size * size)
            .map(|i| {
                if i % 2 == 0 {
                    Rgb::new(255, 255, 255)
                } else {
                    Rgb::new(0, 0, 0)
                }
            })
            .collect();
        Raster::from_pixels(size, pixels).unwrap()
    }

    #[test]
    fn key_equality_over_both_fields() {
        let a = AvatarKey::new("abc", 8).unwrap();
        let b = AvatarKey::new("abc", 8).unwrap();
        let c = AvatarKey::new("abc", 16).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn key_file_name_encodes_both_fields() {
        let key = AvatarKey::new("ab-cd_12", 8).unwrap();
        assert_eq!(key.file_name(), "ab-cd_12_8.png");
    }

    #[test]
    fn key_rejects_zero_size() {
        assert!(matches!(
            AvatarKey::new("abc", 0),
            Err(ChatheadError::InvalidSize(0))
        ));
    }

    #[test]
    fn key_rejects_unsafe_identifier() {
        assert!(AvatarKey::new("", 8).is_err());
        assert!(AvatarKey::new("../escape", 8).is_err());
        assert!(AvatarKey::new("with space", 8).is_err());
    }

    #[tokio::test]
    async fn store_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let cache = AvatarCache::open(Some(temp.path().to_path_buf()))
            .await
            .unwrap();
        let key = AvatarKey::new("abc", 4).unwrap();
        let raster = checker(4);

        cache.store(&key, &raster).await.unwrap();
        let loaded = cache.try_load(&key).await.unwrap();
        assert_eq!(loaded, raster);
    }

    #[tokio::test]
    async fn store_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let cache = AvatarCache::open(Some(temp.path().to_path_buf()))
            .await
            .unwrap();
        let key = AvatarKey::new("abc", 4).unwrap();

        cache.store(&key, &checker(4)).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["abc_4.png".to_string()]);
    }

    #[tokio::test]
    async fn missing_entry_is_miss() {
        let temp = TempDir::new().unwrap();
        let cache = AvatarCache::open(Some(temp.path().to_path_buf()))
            .await
            .unwrap();
        let key = AvatarKey::new("nonexistent", 8).unwrap();
        assert!(cache.try_load(&key).await.is_none());
    }

    #[tokio::test]
    async fn corrupt_entry_is_miss() {
        let temp = TempDir::new().unwrap();
        let cache = AvatarCache::open(Some(temp.path().to_path_buf()))
            .await
            .unwrap();
        let key = AvatarKey::new("abc", 8).unwrap();

        std::fs::write(cache.entry_path(&key).unwrap(), b"truncated junk").unwrap();
        assert!(cache.try_load(&key).await.is_none());
    }

    #[tokio::test]
    async fn wrong_dimension_entry_is_miss() {
        let temp = TempDir::new().unwrap();
        let cache = AvatarCache::open(Some(temp.path().to_path_buf()))
            .await
            .unwrap();
        let key = AvatarKey::new("abc", 8).unwrap();

        // A valid PNG, but 4px where the key demands 8px
        std::fs::write(
            cache.entry_path(&key).unwrap(),
            checker(4).encode_png().unwrap(),
        )
        .unwrap();
        assert!(cache.try_load(&key).await.is_none());
    }

    #[tokio::test]
    async fn disabled_cache_misses_and_stores_ok() {
        let cache = AvatarCache::open(None).await.unwrap();
        let key = AvatarKey::new("abc", 4).unwrap();

        assert!(!cache.is_enabled());
        assert!(cache.try_load(&key).await.is_none());
        cache.store(&key, &checker(4)).await.unwrap();
        assert!(cache.try_load(&key).await.is_none());
    }

    #[tokio::test]
    async fn open_creates_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nested").join("avatars");
        AvatarCache::open(Some(root.clone())).await.unwrap();
        assert!(root.is_dir());
    }
}
