use std::sync::Arc;

use thiserror::Error;

use enrollhub_core::{
    DocumentId, DomainError, Enrollment, News, NewsContent, NewsPatch, Registration,
    RegistrationFields,
};
use enrollhub_infra::{
    config::Persistence,
    store::{
        EnrollmentStore, InMemoryEnrollmentStore, InMemoryNewsStore, InMemoryRegistrationStore,
        NewsStore, RegistrationStore, StoreError,
    },
};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Carries the client-facing message ("Registration not found", ...).
    #[error("{0}")]
    NotFound(&'static str),

    #[error("enrollment is currently closed")]
    EnrollmentClosed,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Store handles shared by every request.
///
/// Registrations and the enrollment flag live in one database, news in another; the
/// handles are acquired once at startup and released when the last clone drops.
#[derive(Clone)]
pub struct AppServices {
    registrations: Arc<dyn RegistrationStore>,
    enrollment: Arc<dyn EnrollmentStore>,
    news: Arc<dyn NewsStore>,
}

impl AppServices {
    pub fn new(
        registrations: Arc<dyn RegistrationStore>,
        enrollment: Arc<dyn EnrollmentStore>,
        news: Arc<dyn NewsStore>,
    ) -> Self {
        Self {
            registrations,
            enrollment,
            news,
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRegistrationStore::new()),
            Arc::new(InMemoryEnrollmentStore::new()),
            Arc::new(InMemoryNewsStore::new()),
        )
    }

    #[cfg(feature = "mongo")]
    pub async fn mongo(registration_uri: &str, news_uri: &str) -> Result<Self, StoreError> {
        use enrollhub_infra::store::{
            MongoEnrollmentStore, MongoNewsStore, MongoRegistrationStore, mongo,
        };

        let registration_db = mongo::connect(registration_uri).await?;
        let news_db = mongo::connect(news_uri).await?;

        Ok(Self::new(
            Arc::new(MongoRegistrationStore::new(&registration_db)),
            Arc::new(MongoEnrollmentStore::new(&registration_db)),
            Arc::new(MongoNewsStore::new(&news_db)),
        ))
    }

    // -------------------------
    // Enrollment
    // -------------------------

    pub async fn enrollment_status(&self) -> ServiceResult<Enrollment> {
        Ok(self.enrollment.get_or_init().await?)
    }

    pub async fn set_enrollment(&self, enabled: bool) -> ServiceResult<Enrollment> {
        Ok(self.enrollment.set(enabled).await?)
    }

    // -------------------------
    // Registrations
    // -------------------------

    pub async fn list_registrations(&self) -> ServiceResult<Vec<Registration>> {
        Ok(self.registrations.list().await?)
    }

    /// Persist a registration if the enrollment gate is open.
    ///
    /// The gate is read, not initialised: a missing singleton means closed.
    pub async fn register(&self, fields: RegistrationFields) -> ServiceResult<Registration> {
        let gate = self.enrollment.get().await?;
        if !Enrollment::admits(gate.as_ref()) {
            return Err(ServiceError::EnrollmentClosed);
        }
        Ok(self.registrations.insert(fields).await?)
    }

    pub async fn delete_registration(&self, id: DocumentId) -> ServiceResult<Registration> {
        self.registrations
            .delete(id)
            .await?
            .ok_or(ServiceError::NotFound("Registration not found"))
    }

    // -------------------------
    // News
    // -------------------------

    pub async fn list_news(&self) -> ServiceResult<Vec<News>> {
        Ok(self.news.list_newest_first().await?)
    }

    pub async fn create_news(&self, text: Option<String>, url: Option<String>) -> ServiceResult<News> {
        let content = NewsContent::new(text, url)?;
        Ok(self.news.insert(content).await?)
    }

    /// Full replace of text + url; the creation date is kept.
    pub async fn replace_news(
        &self,
        id: DocumentId,
        text: Option<String>,
        url: Option<String>,
    ) -> ServiceResult<News> {
        let content = NewsContent::new(text, url)?;
        self.apply_news_patch(id, content.into()).await
    }

    pub async fn patch_news(&self, id: DocumentId, patch: NewsPatch) -> ServiceResult<News> {
        patch.validate()?;
        self.apply_news_patch(id, patch).await
    }

    async fn apply_news_patch(&self, id: DocumentId, patch: NewsPatch) -> ServiceResult<News> {
        self.news
            .update(id, patch)
            .await?
            .ok_or(ServiceError::NotFound("News not found"))
    }

    pub async fn delete_news(&self, id: DocumentId) -> ServiceResult<News> {
        self.news
            .delete(id)
            .await?
            .ok_or(ServiceError::NotFound("News not found"))
    }
}

pub async fn build_services(persistence: &Persistence) -> Result<AppServices, StoreError> {
    match persistence {
        Persistence::InMemory => {
            tracing::info!("using in-memory stores");
            Ok(AppServices::in_memory())
        }
        #[cfg(feature = "mongo")]
        Persistence::Mongo {
            registration_uri,
            news_uri,
        } => {
            tracing::info!("using MongoDB stores");
            AppServices::mongo(registration_uri, news_uri).await
        }
        #[cfg(not(feature = "mongo"))]
        Persistence::Mongo { .. } => {
            tracing::warn!(
                "USE_PERSISTENT_STORES=true but mongo feature not enabled, falling back to in-memory"
            );
            Ok(AppServices::in_memory())
        }
    }
}
