use std::{sync::Arc, time::Duration};

use chrono::Utc;
use serde::Serialize;
use tracing::{error, info, warn};

use super::{
    core::{
        Booking, BookingForm, BookingRepository, Feedback, FeedbackRepository, Money, PriceTable,
        VehicleClass,
    },
    notification::{confirmation_message, DeliveryToken, NotificationError, Notifier},
    StorageError, SubmissionError,
};

/// 通知の結果
#[derive(Debug)]
pub enum NotificationOutcome {
    Delivered { token: DeliveryToken },
    Failed(NotificationError),
}

impl NotificationOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, NotificationOutcome::Delivered { .. })
    }
}

/// 予約受付の結果
#[derive(Debug)]
pub struct BookingOutcome {
    pub booking: Booking,
    pub notification: NotificationOutcome,
}

/// 見積り
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub recognized: bool,
    pub cost: Money,
}

/// 受付窓口
#[derive(Clone)]
pub struct ServiceDesk {
    prices: PriceTable,
    bookings: Arc<dyn BookingRepository>,
    feedback: Arc<dyn FeedbackRepository>,
    notifier: Notifier,
    storage_timeout: Duration,
}

impl ServiceDesk {
    pub fn new(
        prices: PriceTable,
        bookings: Arc<dyn BookingRepository>,
        feedback: Arc<dyn FeedbackRepository>,
        notifier: Notifier,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            prices,
            bookings,
            feedback,
            notifier,
            storage_timeout,
        }
    }

    pub fn quote(&self, vehicle: &str, premium: bool) -> Quote {
        Quote {
            recognized: vehicle.parse::<VehicleClass>().is_ok(),
            cost: self.prices.quote(vehicle, premium),
        }
    }

    pub async fn submit_booking(
        &self,
        form: &BookingForm,
    ) -> Result<BookingOutcome, SubmissionError> {
        let booking = Booking::create(form, &self.prices, Utc::now()).map_err(|e| {
            warn!("予約を受け付けませんでした: {}", e);
            e
        })?;
        self.persist(self.bookings.save(&booking)).await?;
        info!(
            "予約を登録しました: {} / {} / {}",
            booking.name(),
            booking.vehicle().as_str(),
            booking.cost()
        );

        let notification = match self
            .notifier
            .notify(booking.contact(), &confirmation_message(&booking))
            .await
        {
            Ok(token) => NotificationOutcome::Delivered { token },
            Err(e) => NotificationOutcome::Failed(e),
        };
        Ok(BookingOutcome {
            booking,
            notification,
        })
    }

    pub async fn submit_feedback(&self, text: &str) -> Result<Feedback, SubmissionError> {
        let feedback = Feedback::create(text, Utc::now()).map_err(|e| {
            warn!("フィードバックを受け付けませんでした: {}", e);
            e
        })?;
        self.persist(self.feedback.save(&feedback)).await?;
        info!("フィードバックを登録しました");
        Ok(feedback)
    }

    async fn persist<F>(&self, write: F) -> Result<(), StorageError>
    where
        F: std::future::Future<Output = Result<(), StorageError>>,
    {
        let result = match tokio::time::timeout(self.storage_timeout, write).await {
            Ok(result) => result,
            Err(_) => Err(StorageError::Timeout(self.storage_timeout.as_secs())),
        };
        if let Err(e) = &result {
            error!("書き込みに失敗しました: {}", e);
        }
        result
    }
}
