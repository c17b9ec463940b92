//! Submissions of new catalog entries for review.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{StoreError, ValidationError};
use crate::models::Domain;

const MAX_NAME_LEN: usize = 80;
const MAX_DESCRIPTION_LEN: usize = 500;

/// What a user fills in to propose an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub domain: Domain,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Submission {
    /// Check the form against the catalog. Returns the first problem found.
    pub fn validate(&self, catalog: &Catalog) -> Result<(), ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LEN,
            });
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingField("description"));
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::TooLong {
                field: "description",
                max: MAX_DESCRIPTION_LEN,
            });
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        let declared = catalog
            .categories(self.domain)
            .into_iter()
            .skip(1)
            .any(|c| c == self.category);
        if !declared {
            return Err(ValidationError::UnknownCategory {
                domain: self.domain,
                category: self.category.clone(),
            });
        }
        if let Some(link) = self.link.as_deref() {
            let valid = reqwest::Url::parse(link)
                .map(|url| matches!(url.scheme(), "http" | "https"))
                .unwrap_or(false);
            if !valid {
                return Err(ValidationError::InvalidLink(link.to_string()));
            }
        }

        let id = slug(name);
        let taken = catalog.get(self.domain, &id).is_some()
            || catalog
                .items(self.domain)
                .iter()
                .any(|item| item.name.eq_ignore_ascii_case(name));
        if taken {
            return Err(ValidationError::Duplicate {
                domain: self.domain,
                id,
            });
        }
        Ok(())
    }
}

/// A submission as stored for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: String,
    #[serde(flatten)]
    pub submission: Submission,
    #[serde(default)]
    pub submitted_by: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Store `record` and return its id.
    async fn submit(&self, record: &SubmissionRecord) -> Result<String, StoreError>;
}

/// Writes each submission to `<dir>/<id>.json`.
pub struct JsonSubmissionStore {
    dir: PathBuf,
}

impl JsonSubmissionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl SubmissionStore for JsonSubmissionStore {
    async fn submit(&self, record: &SubmissionRecord) -> Result<String, StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let output = serde_json::to_string_pretty(record)?;
        tokio::fs::write(self.dir.join(format!("{}.json", record.id)), output).await?;
        Ok(record.id.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Failed to store submission: {0}")]
    Store(#[from] StoreError),
}

/// Validate `submission` and hand it to `store`. Nothing is stored when
/// validation fails.
pub async fn submit(
    store: &dyn SubmissionStore,
    catalog: &Catalog,
    submission: Submission,
    submitted_by: Option<String>,
) -> Result<String, SubmitError> {
    submission.validate(catalog)?;
    let record = SubmissionRecord {
        id: uuid::Uuid::new_v4().to_string(),
        submission,
        submitted_by,
        submitted_at: Utc::now(),
    };
    let id = store.submit(&record).await?;
    tracing::info!(id = %id, domain = %record.submission.domain, "submission stored");
    Ok(id)
}

/// Lowercase, dash-separated id derived from a display name.
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}
