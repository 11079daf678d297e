use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{StorageError, ValidationError};

/// フィードバックリポジトリ
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// フィードバックを一行書き込む
    async fn save(&self, feedback: &Feedback) -> Result<(), StorageError>;
}

/// フィードバックエンティティ
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    text: String,
    submitted_at: DateTime<Utc>,
}

impl Feedback {
    pub fn create(text: &str, submitted_at: DateTime<Utc>) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::FeedbackIsBlank);
        }
        Ok(Feedback {
            text: text.to_owned(),
            submitted_at,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}
