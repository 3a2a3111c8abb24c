//! News items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DocumentId, DomainError, DomainResult};

/// Validated text + link of a news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsContent {
    text: String,
    url: String,
}

impl NewsContent {
    /// Both fields must be present and non-blank.
    pub fn new(text: Option<String>, url: Option<String>) -> DomainResult<Self> {
        let text = required("text", text)?;
        let url = required("url", url)?;
        Ok(Self { text, url })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn required(field: &str, value: Option<String>) -> DomainResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DomainError::validation(format!("{field} is required"))),
    }
}

/// Partial update of a news item. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsPatch {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl NewsPatch {
    /// Fields that are present must not be blank.
    pub fn validate(&self) -> DomainResult<()> {
        for (field, value) in [("text", &self.text), ("url", &self.url)] {
            if value.as_ref().is_some_and(|v| v.trim().is_empty()) {
                return Err(DomainError::validation(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.url.is_none()
    }
}

impl From<NewsContent> for NewsPatch {
    fn from(content: NewsContent) -> Self {
        Self {
            text: Some(content.text),
            url: Some(content.url),
        }
    }
}

/// A stored news item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct News {
    pub id: DocumentId,
    pub text: String,
    pub url: String,
    /// Creation time, assigned by the server.
    pub date: DateTime<Utc>,
}

impl News {
    pub fn create(id: DocumentId, content: NewsContent, date: DateTime<Utc>) -> Self {
        Self {
            id,
            text: content.text,
            url: content.url,
            date,
        }
    }

    pub fn apply(&mut self, patch: &NewsPatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(url) = &patch.url {
            self.url = url.clone();
        }
    }

    /// Listing order: newest `date` first, later-created id first on ties.
    pub fn newest_first(a: &News, b: &News) -> core::cmp::Ordering {
        b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id))
    }
}
