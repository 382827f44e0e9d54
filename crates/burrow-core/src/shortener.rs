use crate::repository::UrlRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens a URL and returns its record.
    ///
    /// Shortening a URL whose canonical form is already stored returns the
    /// existing record unchanged.
    async fn shorten(&self, original_url: &str) -> Result<UrlRecord>;

    /// Resolves a short code, counting the access.
    /// Returns `Err(NotFound)` if the code does not exist.
    async fn resolve(&self, code: &ShortCode) -> Result<UrlRecord>;

    /// Returns the record for a short code without counting an access.
    async fn stats(&self, code: &ShortCode) -> Result<UrlRecord>;

    /// Returns every stored record.
    async fn list(&self) -> Result<Vec<UrlRecord>>;
}
