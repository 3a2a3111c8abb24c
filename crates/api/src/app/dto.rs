use serde::Deserialize;

use enrollhub_core::{News, NewsPatch, Registration};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct SetEnrollmentRequest {
    pub enabled: bool,
}

/// Body of `POST /api/news` and `PUT /api/news/:id`; presence is checked by the domain.
#[derive(Debug, Deserialize)]
pub struct NewsRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PatchNewsRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<PatchNewsRequest> for NewsPatch {
    fn from(body: PatchNewsRequest) -> Self {
        NewsPatch {
            text: body.text,
            url: body.url,
        }
    }
}

// -------------------------
// Response mapping
// -------------------------

pub fn registration_to_json(r: Registration) -> serde_json::Value {
    let f = r.fields;
    let mut body = serde_json::json!({ "_id": r.id.to_string() });
    for (key, value) in [
        ("firstName", f.first_name),
        ("middleName", f.middle_name),
        ("lastName", f.last_name),
        ("gender", f.gender),
        ("regNumber", f.reg_number),
        ("mobile", f.mobile),
        ("email", f.email),
    ] {
        if let Some(value) = value {
            body[key] = serde_json::Value::String(value);
        }
    }
    body
}

pub fn news_to_json(n: News) -> serde_json::Value {
    serde_json::json!({
        "_id": n.id.to_string(),
        "text": n.text,
        "url": n.url,
        "date": n.date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    })
}
