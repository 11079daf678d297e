use async_trait::async_trait;
use sqlx::AnyPool;

use crate::domain::core::{Feedback, FeedbackRepository};
use crate::domain::StorageError;

static INSERT_FEEDBACK: &str =
    "INSERT INTO customer_feedback (feedback_text, submitted_at) VALUES ($1, $2)";

#[derive(Clone)]
pub struct SqlFeedbackRepository {
    pool: AnyPool,
}

impl SqlFeedbackRepository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for SqlFeedbackRepository {
    async fn save(&self, feedback: &Feedback) -> Result<(), StorageError> {
        let result = sqlx::query(INSERT_FEEDBACK)
            .bind(feedback.text().to_owned())
            .bind(feedback.submitted_at().to_rfc3339())
            .execute(&self.pool)
            .await?;
        match result.rows_affected() {
            1 => Ok(()),
            n => Err(StorageError::WriteError(
                format!("expected one feedback row, wrote {}", n).into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::{infrastructure::connect, Storage};

    use super::*;

    #[tokio::test]
    async fn test_repository() {
        let pool = connect(&Storage {
            endpoint: "sqlite::memory:".to_owned(),
            username: None,
            password: None,
            max_connections: 1,
            timeout_secs: 5,
        })
        .await
        .unwrap();
        let repo = SqlFeedbackRepository::new(pool.clone());

        let submitted_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let feedback = Feedback::create("  Friendly staff.  ", submitted_at).unwrap();
        repo.save(&feedback).await.unwrap();

        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT feedback_text, submitted_at FROM customer_feedback")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(
            rows,
            vec![(
                "Friendly staff.".to_owned(),
                "2024-03-01T09:30:00+00:00".to_owned()
            )]
        );
    }
}
