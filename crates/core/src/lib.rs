//! `enrollhub-core` — domain building blocks.
//!
//! This crate contains **pure domain** types (no infrastructure concerns): document
//! identifiers, the registration/enrollment/news documents and their validation rules.

pub mod enrollment;
pub mod error;
pub mod id;
pub mod news;
pub mod registration;

pub use enrollment::Enrollment;
pub use error::{DomainError, DomainResult};
pub use id::DocumentId;
pub use news::{News, NewsContent, NewsPatch};
pub use registration::{Registration, RegistrationFields};
