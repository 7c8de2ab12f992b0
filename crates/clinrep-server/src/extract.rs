use std::collections::BTreeMap;

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header;
use axum::{Form, Json};

use clinrep_core::models::field::FieldValue;
use clinrep_core::models::submission::Submission;

use crate::error::ApiError;

/// A submission read from a JSON, URL-encoded or multipart form body,
/// chosen by `Content-Type`.
pub struct SubmissionBody(pub Submission);

impl<S> FromRequest<S> for SubmissionBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(submission) = Json::<Submission>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            Ok(Self(submission))
        } else if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            Ok(Self(from_multipart(multipart).await?))
        } else {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            let mut fields = FormFields::default();
            for (name, value) in pairs {
                fields.push(&name, value);
            }
            Ok(Self(fields.into_submission()?))
        }
    }
}

async fn from_multipart(mut multipart: Multipart) -> Result<Submission, ApiError> {
    let mut fields = FormFields::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let text = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        fields.push(&name, text);
    }

    fields.into_submission()
}

/// Form fields keyed by name. A name that repeats, or ends in `[]`,
/// becomes a list; anything else stays a single text value.
#[derive(Default)]
struct FormFields {
    values: BTreeMap<String, (Vec<String>, bool)>,
}

impl FormFields {
    fn push(&mut self, raw_name: &str, value: String) {
        let bracketed = raw_name.ends_with("[]");
        let name = raw_name.trim_end_matches("[]").to_string();
        let (items, is_list) = self.values.entry(name).or_default();
        items.push(value);
        *is_list |= bracketed || items.len() > 1;
    }

    fn into_submission(self) -> Result<Submission, ApiError> {
        let fields: BTreeMap<String, FieldValue> = self
            .values
            .into_iter()
            .map(|(name, (items, is_list))| {
                let value = if is_list {
                    FieldValue::List(items)
                } else {
                    FieldValue::Text(items.into_iter().next().unwrap_or_default())
                };
                (name, value)
            })
            .collect();

        let value = serde_json::to_value(fields)?;
        Ok(serde_json::from_value(value)?)
    }
}
