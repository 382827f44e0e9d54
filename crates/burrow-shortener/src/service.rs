use crate::settings::ShortenerSettings;
use async_trait::async_trait;
use burrow_core::{
    is_valid_url, normalize_url, Insertion, Repository, ShortCode, Shortener, ShortenerError,
    StorageError, UrlRecord,
};
use burrow_generator::Generator;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};

type Result<T> = std::result::Result<T, ShortenerError>;

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Generator` to handle:
/// - URL validation and canonicalization
/// - Deduplication of canonical URLs
/// - Bounded retries when a generated code is already taken
///
/// The dedup check and the insert run inside one exclusive section of the
/// repository ([`Repository::insert_unique`]), so concurrent `shorten` calls
/// for the same URL all receive the same record.
#[derive(Debug)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    settings: ShortenerSettings,
}

impl<R, G> Clone for ShortenerService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            settings: self.settings,
        }
    }
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService` with default settings.
    ///
    /// The repository is shared, so other readers may keep a handle to it.
    pub fn new(repository: Arc<R>, generator: G) -> Self {
        Self::with_settings(repository, generator, ShortenerSettings::default())
    }

    pub fn with_settings(repository: Arc<R>, generator: G, settings: ShortenerSettings) -> Self {
        Self {
            repository,
            generator: Arc::new(generator),
            settings,
        }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    fn generate_code(&self) -> ShortCode {
        self.generator.generate().into()
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, original_url: &str) -> Result<UrlRecord> {
        if !is_valid_url(original_url) {
            return Err(ShortenerError::InvalidUrl(format!("'{}'", original_url)));
        }

        let url = normalize_url(original_url);

        if let Some(existing) = self.repository.find_by_url(&url).await? {
            trace!(code = %existing.code, url = %url, "url already shortened");
            return Ok(existing);
        }

        let attempts = self.settings.attempts();
        for attempt in 1..=attempts {
            let code = self.generate_code();

            match self.repository.insert_unique(&code, &url).await {
                Ok(Insertion::Created(record)) => {
                    info!(code = %record.code, url = %record.original_url, "shortened url");
                    return Ok(record);
                }
                Ok(Insertion::Existing(record)) => {
                    debug!(code = %record.code, url = %url, "url was shortened concurrently");
                    return Ok(record);
                }
                Err(StorageError::Conflict(_)) => {
                    warn!(code = %code, attempt, "short code collision, retrying");
                }
                Err(other) => return Err(other.into()),
            }
        }

        error!(url = %url, attempts, "every generated short code collided");
        Err(ShortenerError::CodeSpaceExhausted { attempts })
    }

    async fn resolve(&self, code: &ShortCode) -> Result<UrlRecord> {
        match self.repository.increment_access(code).await? {
            Some(record) => {
                debug!(
                    code = %code,
                    url = %record.original_url,
                    count = record.access_count,
                    "resolved short code"
                );
                Ok(record)
            }
            None => {
                trace!(code = %code, "short code not found");
                Err(ShortenerError::NotFound(code.to_string()))
            }
        }
    }

    async fn stats(&self, code: &ShortCode) -> Result<UrlRecord> {
        self.repository
            .get(code)
            .await?
            .ok_or_else(|| ShortenerError::NotFound(code.to_string()))
    }

    async fn list(&self) -> Result<Vec<UrlRecord>> {
        let mut records = self.repository.list().await?;
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.code.cmp(&b.code))
        });
        Ok(records)
    }
}
