use crate::error::Result;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored mapping from a short code to the URL it stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The primary key of the record.
    pub code: ShortCode,
    /// The canonicalized URL that was shortened.
    pub original_url: String,
    /// When the record was created.
    pub created_at: Timestamp,
    /// Number of successful resolves since creation.
    pub access_count: u64,
}

impl UrlRecord {
    /// Creates a fresh record with a zero access count.
    pub fn new(code: ShortCode, original_url: impl Into<String>) -> Self {
        Self {
            code,
            original_url: original_url.into(),
            created_at: Timestamp::now(),
            access_count: 0,
        }
    }
}

/// Outcome of [`Repository::insert_unique`].
#[derive(Debug, Clone, PartialEq)]
pub enum Insertion {
    /// A new record was stored under the requested code.
    Created(UrlRecord),
    /// A record for the URL already existed and was left untouched.
    Existing(UrlRecord),
}

impl Insertion {
    /// Returns true if the insertion stored a new record.
    pub fn is_created(&self) -> bool {
        matches!(self, Insertion::Created(_))
    }

    pub fn into_record(self) -> UrlRecord {
        match self {
            Insertion::Created(record) | Insertion::Existing(record) => record,
        }
    }
}

/// A read-only view of a repository.
///
/// Every method returns owned copies; callers never alias stored records.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the record for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;

    /// Retrieves the record whose original URL equals `url`.
    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>>;

    /// Returns a snapshot of every record, in no particular order.
    async fn list(&self) -> Result<Vec<UrlRecord>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new record. Returns `Err(Conflict)` if the code already exists.
    async fn insert(&self, code: &ShortCode, original_url: &str) -> Result<UrlRecord>;

    /// Inserts a new record unless one already exists for `original_url`.
    ///
    /// The URL check, the code check and the insert happen in one exclusive
    /// section, so concurrent calls for the same URL store at most one record.
    /// Returns `Err(Conflict)` if no record exists for the URL but the code is
    /// taken.
    async fn insert_unique(&self, code: &ShortCode, original_url: &str) -> Result<Insertion>;

    /// Increments the access count of a record and returns the updated copy.
    /// Returns `None` if the code does not exist.
    async fn increment_access(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;
}
