//! Document store boundary.
//!
//! Each collection sits behind its own async trait so the HTTP layer never sees the
//! backing database. `in_memory` serves tests and local runs; `mongo` (feature
//! `mongo`) talks to a MongoDB deployment.

pub mod in_memory;
#[cfg(feature = "mongo")]
pub mod mongo;
pub mod r#trait;

pub use in_memory::{InMemoryEnrollmentStore, InMemoryNewsStore, InMemoryRegistrationStore};
#[cfg(feature = "mongo")]
pub use mongo::{MongoEnrollmentStore, MongoNewsStore, MongoRegistrationStore};
pub use r#trait::{EnrollmentStore, NewsStore, RegistrationStore, StoreError, StoreResult};
