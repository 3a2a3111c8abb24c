use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use enrollhub_core::{
    DocumentId, Enrollment, News, NewsContent, NewsPatch, Registration, RegistrationFields,
};

use super::r#trait::{EnrollmentStore, NewsStore, RegistrationStore, StoreError, StoreResult};

fn read<'a, T>(lock: &'a RwLock<T>, operation: &'static str) -> StoreResult<RwLockReadGuard<'a, T>> {
    lock.read()
        .map_err(|_| StoreError::backend(operation, "lock poisoned"))
}

fn write<'a, T>(
    lock: &'a RwLock<T>,
    operation: &'static str,
) -> StoreResult<RwLockWriteGuard<'a, T>> {
    lock.write()
        .map_err(|_| StoreError::backend(operation, "lock poisoned"))
}

/// In-memory registration store.
///
/// Intended for tests/dev. Keeps insertion order.
#[derive(Debug, Default)]
pub struct InMemoryRegistrationStore {
    docs: RwLock<Vec<Registration>>,
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegistrationStore for InMemoryRegistrationStore {
    async fn list(&self) -> StoreResult<Vec<Registration>> {
        Ok(read(&self.docs, "registrations.list")?.clone())
    }

    async fn insert(&self, fields: RegistrationFields) -> StoreResult<Registration> {
        let registration = Registration::new(DocumentId::new(), fields);
        write(&self.docs, "registrations.insert")?.push(registration.clone());
        Ok(registration)
    }

    async fn delete(&self, id: DocumentId) -> StoreResult<Option<Registration>> {
        let mut docs = write(&self.docs, "registrations.delete")?;
        Ok(docs
            .iter()
            .position(|r| r.id == id)
            .map(|idx| docs.remove(idx)))
    }
}

/// In-memory enrollment singleton.
#[derive(Debug, Default)]
pub struct InMemoryEnrollmentStore {
    gate: RwLock<Option<Enrollment>>,
}

impl InMemoryEnrollmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnrollmentStore for InMemoryEnrollmentStore {
    async fn get(&self) -> StoreResult<Option<Enrollment>> {
        Ok(*read(&self.gate, "enrollment.get")?)
    }

    async fn get_or_init(&self) -> StoreResult<Enrollment> {
        let mut gate = write(&self.gate, "enrollment.get_or_init")?;
        Ok(*gate.get_or_insert_with(Enrollment::default))
    }

    async fn set(&self, enabled: bool) -> StoreResult<Enrollment> {
        let enrollment = Enrollment::new(enabled);
        *write(&self.gate, "enrollment.set")? = Some(enrollment);
        Ok(enrollment)
    }
}

/// In-memory news store.
#[derive(Debug, Default)]
pub struct InMemoryNewsStore {
    items: RwLock<HashMap<DocumentId, News>>,
}

impl InMemoryNewsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsStore for InMemoryNewsStore {
    async fn list_newest_first(&self) -> StoreResult<Vec<News>> {
        let mut items: Vec<News> = read(&self.items, "news.list")?.values().cloned().collect();
        items.sort_by(News::newest_first);
        Ok(items)
    }

    async fn insert(&self, content: NewsContent) -> StoreResult<News> {
        let news = News::create(DocumentId::new(), content, Utc::now());
        write(&self.items, "news.insert")?.insert(news.id, news.clone());
        Ok(news)
    }

    async fn update(&self, id: DocumentId, patch: NewsPatch) -> StoreResult<Option<News>> {
        let mut items = write(&self.items, "news.update")?;
        Ok(items.get_mut(&id).map(|news| {
            news.apply(&patch);
            news.clone()
        }))
    }

    async fn delete(&self, id: DocumentId) -> StoreResult<Option<News>> {
        Ok(write(&self.items, "news.delete")?.remove(&id))
    }
}
