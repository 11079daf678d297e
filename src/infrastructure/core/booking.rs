use async_trait::async_trait;
use sqlx::AnyPool;

use crate::domain::core::{Booking, BookingRepository};
use crate::domain::StorageError;

static INSERT_BOOKING: &str = "INSERT INTO garage_service_bookings \
    (name, contact, vehicle_type, cost, booked_at) VALUES ($1, $2, $3, $4, $5)";

#[derive(Clone)]
pub struct SqlBookingRepository {
    pool: AnyPool,
}

impl SqlBookingRepository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqlBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), StorageError> {
        let result = sqlx::query(INSERT_BOOKING)
            .bind(booking.name().to_owned())
            .bind(booking.contact().to_owned())
            .bind(booking.vehicle().as_str())
            .bind(booking.cost().to_major())
            .bind(booking.booked_at().to_rfc3339())
            .execute(&self.pool)
            .await?;
        match result.rows_affected() {
            1 => Ok(()),
            n => Err(StorageError::WriteError(
                format!("expected one booking row, wrote {}", n).into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::{
        domain::core::{BookingForm, PriceTable},
        infrastructure::connect,
        Storage,
    };

    use super::*;

    async fn memory_pool() -> AnyPool {
        connect(&Storage {
            endpoint: "sqlite::memory:".to_owned(),
            username: None,
            password: None,
            max_connections: 1,
            timeout_secs: 5,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_repository() {
        // リポジトリ作成
        let pool = memory_pool().await;
        let repo = SqlBookingRepository::new(pool.clone());

        // エンティティ生成
        let booking = Booking::create(
            &BookingForm {
                name: "Asha".to_owned(),
                contact: "9998887770".to_owned(),
                vehicle: "two-wheeler".to_owned(),
                premium: false,
            },
            &PriceTable::default(),
            Utc::now(),
        )
        .unwrap();

        // エンティティ登録確認
        repo.save(&booking).await.unwrap();
        let rows: Vec<(String, String, String, f64)> = sqlx::query_as(
            "SELECT name, contact, vehicle_type, cost FROM garage_service_bookings",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(
            rows,
            vec![(
                "Asha".to_owned(),
                "9998887770".to_owned(),
                "two-wheeler".to_owned(),
                500.0
            )]
        );
    }

    #[tokio::test]
    async fn test_repository_premium_cost() {
        let pool = memory_pool().await;
        let repo = SqlBookingRepository::new(pool.clone());
        let booking = Booking::create(
            &BookingForm {
                name: "Ravi".to_owned(),
                contact: "+919000000000".to_owned(),
                vehicle: "3 Wheeler".to_owned(),
                premium: true,
            },
            &PriceTable::default(),
            Utc::now(),
        )
        .unwrap();
        repo.save(&booking).await.unwrap();
        let (vehicle, cost): (String, f64) =
            sqlx::query_as("SELECT vehicle_type, cost FROM garage_service_bookings")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(vehicle, "three-wheeler");
        assert_eq!(cost, 675.0);
    }

    #[tokio::test]
    async fn test_repository_missing_table() {
        let pool = memory_pool().await;
        sqlx::query("DROP TABLE garage_service_bookings")
            .execute(&pool)
            .await
            .unwrap();
        let repo = SqlBookingRepository::new(pool);
        let booking = Booking::create(
            &BookingForm {
                name: "Asha".to_owned(),
                contact: "9998887770".to_owned(),
                vehicle: "two-wheeler".to_owned(),
                premium: false,
            },
            &PriceTable::default(),
            Utc::now(),
        )
        .unwrap();
        assert!(matches!(
            repo.save(&booking).await,
            Err(StorageError::WriteError(_))
        ));
    }
}
