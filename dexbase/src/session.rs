use crate::species::Asset;
use crate::{Error, Species};

use bytes::Bytes;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Downloads the images behind the asset URLs of the catalog.
#[derive(Debug, Clone)]
pub struct Session {
    client: reqwest::Client,
    retries: usize,
    cache: Option<PathBuf>,
}

impl Session {
    pub fn new(retries: usize, cache: Option<PathBuf>) -> Self {
        if let Some(cache) = &cache {
            log::info!("Session started (image cache: {})", cache.display());
        } else {
            log::warn!("Session started without an image cache!");
        }

        Self {
            client: CLIENT.clone(),
            retries,
            cache,
        }
    }

    /// Replaces the shared client with one using a different request timeout.
    pub fn with_timeout(self, timeout: Duration) -> Result<Self, Error> {
        if timeout == DEFAULT_TIMEOUT {
            return Ok(self);
        }

        Ok(Self {
            client: reqwest::ClientBuilder::new().timeout(timeout).build()?,
            ..self
        })
    }

    /// Downloads the image of `asset`, going through the cache when there is one.
    ///
    /// The cache is best-effort: when it cannot be read or written the image is
    /// still downloaded and returned.
    pub async fn download(&self, species: &Species, asset: Asset) -> Result<Image, Error> {
        let cached = self.cache.as_deref().map(|cache| cache_path(cache, species, asset));

        if let Some(path) = &cached {
            if let Some(bytes) = read_cached(path).await {
                return Ok(Image { bytes });
            }
        }

        let url = species.asset(asset);

        log::info!("Downloading image: {url}");
        let response = retry(self.retries, || self.client.get(url).send()).await?;
        let bytes = response.error_for_status()?.bytes().await?;

        if let Some(path) = &cached {
            if let Err(error) = store(path, &bytes).await {
                log::warn!("Image could not be cached at {}: {error}", path.display());
            }
        }

        Ok(Image { bytes })
    }

    /// Downloads `asset` for every species, a few at a time.
    ///
    /// Results are returned in the same order as `species`.
    pub async fn download_all(
        &self,
        species: &[Species],
        asset: Asset,
        concurrency: usize,
    ) -> Vec<Result<Image, Error>> {
        use futures_util::{StreamExt, stream};

        stream::iter(species)
            .map(|species| self.download(species, asset))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(2, None)
    }
}

#[derive(Clone)]
pub struct Image {
    pub bytes: Bytes,
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Where an image lives inside a cache directory. Mirrors the layout of the asset host.
pub fn cache_path(cache: &Path, species: &Species, asset: Asset) -> PathBuf {
    cache
        .join(asset.directory())
        .join(format!("{}.png", species.number))
}

async fn read_cached(path: &Path) -> Option<Bytes> {
    use tokio::fs;

    match fs::read(path).await {
        Ok(bytes) => {
            log::debug!("Reading cached image: {}", path.display());

            Some(Bytes::from(bytes))
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => None,
        Err(error) => {
            log::warn!("Cached image {} is not readable: {error}", path.display());

            None
        }
    }
}

/// Writes next to `path` first and renames, so an interrupted write never leaves
/// a truncated image behind.
async fn store(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    use tokio::fs;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let partial = path.with_extension("png.part");

    fs::write(&partial, bytes).await?;

    if let Err(error) = fs::rename(&partial, path).await {
        let _ = fs::remove_file(&partial).await;

        return Err(error.into());
    }

    Ok(())
}

static CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::ClientBuilder::new()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .expect("Build reqwest client")
});

async fn retry<T, E, F>(mut retries: usize, f: impl Fn() -> F) -> Result<T, E>
where
    E: fmt::Display,
    F: Future<Output = Result<T, E>>,
{
    loop {
        match f().await {
            Ok(response) => {
                break Ok(response);
            }
            Err(error) => {
                if retries > 0 {
                    log::warn!(
                        "{error} ({retries} {} left)",
                        if retries == 1 { "retry" } else { "retries" }
                    );
                    retries -= 1;
                } else {
                    break Err(error);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;

    use std::sync::atomic::{AtomicUsize, Ordering};

    fn temp_cache(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dexbase-{name}-{}", std::process::id()))
    }

    #[test]
    fn cache_mirrors_asset_host() {
        let pikachu = Catalog::get().find("pikachu").unwrap();
        let cache = Path::new("/cache");

        assert_eq!(
            cache_path(cache, pikachu, Asset::Sprite),
            Path::new("/cache/25.png")
        );
        assert_eq!(
            cache_path(cache, pikachu, Asset::ArtworkShiny),
            Path::new("/cache/other/official-artwork/shiny/25.png")
        );
    }

    #[tokio::test]
    async fn cached_images_skip_the_network() {
        let cache = temp_cache("cached");
        let mew = Catalog::get().find("151").unwrap();
        let path = cache_path(&cache, mew, Asset::Artwork);

        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, b"not really a png").await.unwrap();

        let session = Session::new(0, Some(cache.clone()));
        let image = session.download(mew, Asset::Artwork).await.unwrap();

        assert_eq!(&image.bytes[..], b"not really a png");

        let _ = tokio::fs::remove_dir_all(cache).await;
    }

    #[tokio::test]
    async fn download_all_keeps_order() {
        let cache = temp_cache("ordered");
        let species = &Catalog::get().all()[..8];

        for species in species {
            let path = cache_path(&cache, species, Asset::Sprite);

            tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
            tokio::fs::write(&path, species.name.as_bytes()).await.unwrap();
        }

        let session = Session::new(0, Some(cache.clone()));
        let images = session.download_all(species, Asset::Sprite, 3).await;

        let names: Vec<_> = images
            .into_iter()
            .map(|image| String::from_utf8(image.unwrap().bytes.to_vec()).unwrap())
            .collect();

        let expected: Vec<_> = species.iter().map(|species| species.name.clone()).collect();
        assert_eq!(names, expected);

        let _ = tokio::fs::remove_dir_all(cache).await;
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unusable_cache_still_reaches_the_network() {
        let mut pikachu = Catalog::get().find("pikachu").unwrap().clone();
        pikachu.sprite = "http://127.0.0.1:9/25.png".to_owned();

        let session = Session::new(0, Some(PathBuf::from("/dev/null/dexter")));
        let result = session.download(&pikachu, Asset::Sprite).await;

        assert!(
            matches!(result, Err(Error::RequestFailed(_))),
            "{result:?}"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unusable_cache_is_skipped() {
        let path = Path::new("/dev/null/dexter/25.png");

        assert!(read_cached(path).await.is_none());
        assert!(matches!(
            store(path, b"png").await,
            Err(Error::CacheFailed(_))
        ));
    }

    #[tokio::test]
    async fn store_leaves_no_partial_file() {
        let cache = temp_cache("store");
        let path = cache.join("shiny").join("7.png");

        store(&path, b"first").await.unwrap();
        store(&path, b"second").await.unwrap();

        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"second");
        assert!(!tokio::fs::try_exists(path.with_extension("png.part")).await.unwrap());
        assert_eq!(read_cached(&path).await.as_deref(), Some(&b"second"[..]));

        let _ = tokio::fs::remove_dir_all(cache).await;
    }

    #[tokio::test]
    async fn retry_until_success() {
        let attempts = &AtomicUsize::new(0);

        let result: Result<usize, String> = retry(2, move || async move {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst);

            if attempt < 2 {
                Err(format!("attempt {attempt} failed"))
            } else {
                Ok(attempt)
            }
        })
        .await;

        assert_eq!(result, Ok(2));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retry_gives_up() {
        let attempts = &AtomicUsize::new(0);

        let result: Result<(), &str> = retry(1, move || async move {
            let _ = attempts.fetch_add(1, Ordering::SeqCst);

            Err("offline")
        })
        .await;

        assert_eq!(result, Err("offline"));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}
