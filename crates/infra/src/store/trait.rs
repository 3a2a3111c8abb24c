use async_trait::async_trait;
use thiserror::Error;

use enrollhub_core::{
    DocumentId, Enrollment, News, NewsContent, NewsPatch, Registration, RegistrationFields,
};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure.
///
/// "Not found" is not an error here: lookups by id return `Option` and the caller
/// decides what absence means.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend (driver, connection, lock) failed.
    #[error("store backend error in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    /// A stored document could not be mapped back to a domain value.
    #[error("corrupt document in {operation}: {message}")]
    Corrupt {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn backend(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            operation,
            message: message.into(),
        }
    }

    pub fn corrupt(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Corrupt {
            operation,
            message: message.into(),
        }
    }
}

/// Registration documents.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// All registrations in store-native (insertion) order.
    async fn list(&self) -> StoreResult<Vec<Registration>>;

    async fn insert(&self, fields: RegistrationFields) -> StoreResult<Registration>;

    /// Remove by id, returning the removed document if it existed.
    async fn delete(&self, id: DocumentId) -> StoreResult<Option<Registration>>;
}

/// The enrollment singleton.
///
/// Implementations key the singleton so that concurrent first access cannot create
/// more than one.
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Current gate state without creating it.
    async fn get(&self) -> StoreResult<Option<Enrollment>>;

    /// Current gate state, atomically creating it with
    /// [`Enrollment::DEFAULT_ENABLED`] when absent.
    async fn get_or_init(&self) -> StoreResult<Enrollment>;

    /// Set the flag, creating the singleton when absent.
    async fn set(&self, enabled: bool) -> StoreResult<Enrollment>;
}

/// News documents.
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// All news, newest `date` first (see [`News::newest_first`]).
    async fn list_newest_first(&self) -> StoreResult<Vec<News>>;

    /// Persist with a server-assigned creation time.
    async fn insert(&self, content: NewsContent) -> StoreResult<News>;

    /// Apply a partial update; `None` when no document has this id.
    async fn update(&self, id: DocumentId, patch: NewsPatch) -> StoreResult<Option<News>>;

    async fn delete(&self, id: DocumentId) -> StoreResult<Option<News>>;
}
