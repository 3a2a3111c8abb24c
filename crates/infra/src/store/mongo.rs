//! MongoDB-backed stores.
//!
//! Collection names match what Mongoose created for the same models, so an existing
//! database can be used as is:
//!
//! | Store | Collection |
//! |-------|------------|
//! | `MongoRegistrationStore` | `registrations` |
//! | `MongoEnrollmentStore` | `enrollments` |
//! | `MongoNewsStore` | `news` |
//!
//! ## Enrollment singleton
//!
//! The flag lives in a single document with the fixed `_id` [`ENROLLMENT_KEY`]. Both
//! the lazy default and the toggle are `findOneAndUpdate` upserts on that key, so
//! concurrent first access resolves to one document.
//!
//! Databases written before the keyed singleton hold it under a generated `_id`. While
//! the keyed document is absent, reads fall back to that legacy document and the lazy
//! default is seeded from it, so a closed gate stays closed.
//!
//! ## Error Mapping
//!
//! Every driver error becomes `StoreError::Backend` tagged with the operation name.
//! Documents that fail to decode become `StoreError::Corrupt`.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{options::ReturnDocument, Client, Collection, Database};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use enrollhub_core::{
    DocumentId, Enrollment, News, NewsContent, NewsPatch, Registration, RegistrationFields,
};

use super::r#trait::{EnrollmentStore, NewsStore, RegistrationStore, StoreError, StoreResult};

pub const REGISTRATIONS: &str = "registrations";
pub const ENROLLMENTS: &str = "enrollments";
pub const NEWS: &str = "news";

/// `_id` of the enrollment singleton.
pub const ENROLLMENT_KEY: &str = "enrollment";

/// Database used when the connection string names none.
const FALLBACK_DATABASE: &str = "test";

fn map_mongo_error(operation: &'static str, err: mongodb::error::Error) -> StoreError {
    match *err.kind {
        mongodb::error::ErrorKind::BsonDeserialization(ref e) => {
            StoreError::corrupt(operation, e.to_string())
        }
        _ => StoreError::backend(operation, err.to_string()),
    }
}

/// Open a client for `uri` and select its default database.
///
/// The client is held for the lifetime of the returned handle; dropping every store
/// built from it releases the connection pool.
pub async fn connect(uri: &str) -> StoreResult<Database> {
    let client = Client::with_uri_str(uri)
        .await
        .map_err(|e| map_mongo_error("connect", e))?;
    let database = client
        .default_database()
        .unwrap_or_else(|| client.database(FALLBACK_DATABASE));

    info!(database = database.name(), "connected to document store");
    Ok(database)
}

#[derive(Debug, Serialize, Deserialize)]
struct RegistrationDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(flatten)]
    fields: RegistrationFields,
}

impl From<RegistrationDoc> for Registration {
    fn from(doc: RegistrationDoc) -> Self {
        Registration::new(DocumentId::from_object_id(doc.id), doc.fields)
    }
}

/// Registrations in the `registrations` collection.
#[derive(Debug, Clone)]
pub struct MongoRegistrationStore {
    collection: Collection<RegistrationDoc>,
}

impl MongoRegistrationStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(REGISTRATIONS),
        }
    }
}

#[async_trait]
impl RegistrationStore for MongoRegistrationStore {
    #[instrument(skip(self), err)]
    async fn list(&self) -> StoreResult<Vec<Registration>> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| map_mongo_error("registrations.list", e))?;
        let docs: Vec<RegistrationDoc> = cursor
            .try_collect()
            .await
            .map_err(|e| map_mongo_error("registrations.list", e))?;
        Ok(docs.into_iter().map(Registration::from).collect())
    }

    #[instrument(skip(self, fields), err)]
    async fn insert(&self, fields: RegistrationFields) -> StoreResult<Registration> {
        let doc = RegistrationDoc {
            id: ObjectId::new(),
            fields,
        };
        self.collection
            .insert_one(&doc)
            .await
            .map_err(|e| map_mongo_error("registrations.insert", e))?;
        Ok(doc.into())
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: DocumentId) -> StoreResult<Option<Registration>> {
        let removed = self
            .collection
            .find_one_and_delete(doc! { "_id": ObjectId::from(id) })
            .await
            .map_err(|e| map_mongo_error("registrations.delete", e))?;
        Ok(removed.map(Registration::from))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct EnrollmentDoc {
    #[serde(rename = "_id")]
    id: String,
    enabled: bool,
}

/// Singleton as stored before it was keyed. A missing flag counted as closed.
#[derive(Debug, Deserialize)]
struct LegacyEnrollmentDoc {
    #[serde(default)]
    enabled: Option<bool>,
}

impl From<LegacyEnrollmentDoc> for Enrollment {
    fn from(doc: LegacyEnrollmentDoc) -> Self {
        Enrollment::new(doc.enabled.unwrap_or(false))
    }
}

/// Enrollment singleton in the `enrollments` collection.
#[derive(Debug, Clone)]
pub struct MongoEnrollmentStore {
    collection: Collection<EnrollmentDoc>,
    legacy: Collection<LegacyEnrollmentDoc>,
}

impl MongoEnrollmentStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(ENROLLMENTS),
            legacy: database.collection(ENROLLMENTS),
        }
    }

    async fn find_legacy(&self, operation: &'static str) -> StoreResult<Option<Enrollment>> {
        let doc = self
            .legacy
            .find_one(doc! { "_id": { "$ne": ENROLLMENT_KEY } })
            .await
            .map_err(|e| map_mongo_error(operation, e))?;
        Ok(doc.map(Enrollment::from))
    }

    async fn upsert(&self, operation: &'static str, update: Document) -> StoreResult<Enrollment> {
        let doc = self
            .collection
            .find_one_and_update(doc! { "_id": ENROLLMENT_KEY }, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| map_mongo_error(operation, e))?
            .ok_or_else(|| StoreError::backend(operation, "upsert returned no document"))?;
        Ok(Enrollment::new(doc.enabled))
    }
}

#[async_trait]
impl EnrollmentStore for MongoEnrollmentStore {
    #[instrument(skip(self), err)]
    async fn get(&self) -> StoreResult<Option<Enrollment>> {
        let doc = self
            .collection
            .find_one(doc! { "_id": ENROLLMENT_KEY })
            .await
            .map_err(|e| map_mongo_error("enrollment.get", e))?;
        match doc {
            Some(d) => Ok(Some(Enrollment::new(d.enabled))),
            None => self.find_legacy("enrollment.get").await,
        }
    }

    #[instrument(skip(self), err)]
    async fn get_or_init(&self) -> StoreResult<Enrollment> {
        let seed = match self.get().await? {
            Some(current) => current.enabled,
            None => Enrollment::DEFAULT_ENABLED,
        };
        self.upsert(
            "enrollment.get_or_init",
            doc! { "$setOnInsert": { "enabled": seed } },
        )
        .await
    }

    #[instrument(skip(self), err)]
    async fn set(&self, enabled: bool) -> StoreResult<Enrollment> {
        self.upsert("enrollment.set", doc! { "$set": { "enabled": enabled } })
            .await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct NewsDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default)]
    text: String,
    #[serde(default)]
    url: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    date: DateTime<Utc>,
}

impl From<NewsDoc> for News {
    fn from(doc: NewsDoc) -> Self {
        News {
            id: DocumentId::from_object_id(doc.id),
            text: doc.text,
            url: doc.url,
            date: doc.date,
        }
    }
}

/// News items in the `news` collection.
#[derive(Debug, Clone)]
pub struct MongoNewsStore {
    collection: Collection<NewsDoc>,
}

impl MongoNewsStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(NEWS),
        }
    }
}

#[async_trait]
impl NewsStore for MongoNewsStore {
    #[instrument(skip(self), err)]
    async fn list_newest_first(&self) -> StoreResult<Vec<News>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "date": -1, "_id": -1 })
            .await
            .map_err(|e| map_mongo_error("news.list", e))?;
        let docs: Vec<NewsDoc> = cursor
            .try_collect()
            .await
            .map_err(|e| map_mongo_error("news.list", e))?;
        Ok(docs.into_iter().map(News::from).collect())
    }

    #[instrument(skip(self, content), err)]
    async fn insert(&self, content: NewsContent) -> StoreResult<News> {
        // Stored timestamps have millisecond precision; truncate up front so the
        // returned document matches what a later read sees.
        let now = bson::DateTime::now().to_chrono();
        let doc = NewsDoc {
            id: ObjectId::new(),
            text: content.text().to_string(),
            url: content.url().to_string(),
            date: now,
        };
        self.collection
            .insert_one(&doc)
            .await
            .map_err(|e| map_mongo_error("news.insert", e))?;
        Ok(doc.into())
    }

    #[instrument(skip(self, patch), err)]
    async fn update(&self, id: DocumentId, patch: NewsPatch) -> StoreResult<Option<News>> {
        let filter = doc! { "_id": ObjectId::from(id) };

        let doc = if patch.is_empty() {
            self.collection
                .find_one(filter)
                .await
                .map_err(|e| map_mongo_error("news.update", e))?
        } else {
            let mut set = Document::new();
            if let Some(text) = patch.text {
                set.insert("text", text);
            }
            if let Some(url) = patch.url {
                set.insert("url", url);
            }
            self.collection
                .find_one_and_update(filter, doc! { "$set": set })
                .return_document(ReturnDocument::After)
                .await
                .map_err(|e| map_mongo_error("news.update", e))?
        };
        Ok(doc.map(News::from))
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: DocumentId) -> StoreResult<Option<News>> {
        let removed = self
            .collection
            .find_one_and_delete(doc! { "_id": ObjectId::from(id) })
            .await
            .map_err(|e| map_mongo_error("news.delete", e))?;
        Ok(removed.map(News::from))
    }
}
