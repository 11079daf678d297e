pub mod core;
pub mod messaging;

use std::{sync::Arc, time::Duration};

use reqwest::Url;
use sqlx::{any::AnyPoolOptions, AnyPool};
use thiserror::Error;
use tracing::info;

use crate::{
    domain::{
        core::{PriceTable, PricingError},
        desk::ServiceDesk,
        notification::Notifier,
        StorageError,
    },
    GarageConfig, Storage,
};

use self::{
    core::{SqlBookingRepository, SqlFeedbackRepository},
    messaging::TwilioGateway,
};

static CREATE_BOOKINGS: &str = "CREATE TABLE IF NOT EXISTS garage_service_bookings (
    name TEXT NOT NULL,
    contact TEXT NOT NULL,
    vehicle_type TEXT NOT NULL,
    cost DOUBLE PRECISION NOT NULL,
    booked_at TEXT NOT NULL
)";

static CREATE_FEEDBACK: &str = "CREATE TABLE IF NOT EXISTS customer_feedback (
    feedback_text TEXT NOT NULL,
    submitted_at TEXT NOT NULL
)";

impl From<sqlx::Error> for StorageError {
    fn from(value: sqlx::Error) -> Self {
        match value {
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::ConnectionError(Box::new(value)),
            sqlx::Error::Database(_) => Self::WriteError(Box::new(value)),
            _ => Self::QueryError(Box::new(value)),
        }
    }
}

/// 起動時のエラー
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Invalid storage endpoint: {0}")]
    Endpoint(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Invalid price table: {0}")]
    Pricing(#[from] PricingError),
    #[error("Messaging client error: {0}")]
    Messaging(#[from] reqwest::Error),
}

fn connection_url(storage: &Storage) -> Result<String, SetupError> {
    if storage.username.is_none() && storage.password.is_none() {
        return Ok(storage.endpoint.clone());
    }
    let mut url =
        Url::parse(&storage.endpoint).map_err(|e| SetupError::Endpoint(e.to_string()))?;
    if let Some(username) = &storage.username {
        url.set_username(username)
            .map_err(|_| SetupError::Endpoint(storage.endpoint.clone()))?;
    }
    url.set_password(storage.password.as_deref())
        .map_err(|_| SetupError::Endpoint(storage.endpoint.clone()))?;
    Ok(url.into())
}

/// 接続プールの作成
pub async fn connect(storage: &Storage) -> Result<AnyPool, SetupError> {
    sqlx::any::install_default_drivers();
    let pool = AnyPoolOptions::new()
        .max_connections(storage.max_connections)
        .acquire_timeout(Duration::from_secs(storage.timeout_secs))
        .connect(&connection_url(storage)?)
        .await
        .map_err(StorageError::from)?;
    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &AnyPool) -> Result<(), StorageError> {
    sqlx::query(CREATE_BOOKINGS).execute(pool).await?;
    sqlx::query(CREATE_FEEDBACK).execute(pool).await?;
    Ok(())
}

/// 受付窓口の組み立て
pub async fn open_desk(config: &GarageConfig) -> Result<ServiceDesk, SetupError> {
    let prices = PriceTable::from_config(&config.pricing)?;
    let pool = connect(&config.storage).await?;
    let gateway = TwilioGateway::new(&config.messaging)?;
    let notifier = Notifier::new(
        Arc::new(gateway),
        config.messaging.origin.clone(),
        Duration::from_secs(config.messaging.timeout_secs),
    );
    info!("受付窓口を開きました");
    Ok(ServiceDesk::new(
        prices,
        Arc::new(SqlBookingRepository::new(pool.clone())),
        Arc::new(SqlFeedbackRepository::new(pool)),
        notifier,
        Duration::from_secs(config.storage.timeout_secs),
    ))
}
