use std::time::Duration;

use async_trait::async_trait;
use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use super::{core::Booking, BoxError};

/// メッセージ送信ゲートウェイ
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// `body` を `destination` へ送信し、受付トークンを返す
    async fn send(
        &self,
        destination: &str,
        origin: &str,
        body: &str,
    ) -> Result<DeliveryToken, GatewayError>;
}

/// 受付トークン
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Deref)]
#[from(forward)]
pub struct DeliveryToken(String);

/// ゲートウェイエラー
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Gateway rejected the message ({status}): {reason}")]
    Rejected { status: u16, reason: String },
    #[error("Gateway could not be reached: {0}")]
    Unreachable(BoxError),
    #[error("Gateway answered with an unexpected body: {0}")]
    InvalidResponse(BoxError),
}

/// 通知エラー
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("Gateway did not answer within {0} seconds")]
    Timeout(u64),
}

/// 予約確認の通知者
#[derive(Clone)]
pub struct Notifier {
    gateway: std::sync::Arc<dyn MessagingGateway>,
    origin: String,
    timeout: Duration,
}

impl Notifier {
    pub fn new(
        gateway: std::sync::Arc<dyn MessagingGateway>,
        origin: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            gateway,
            origin: origin.into(),
            timeout,
        }
    }

    pub async fn notify(
        &self,
        contact: &str,
        message: &str,
    ) -> Result<DeliveryToken, NotificationError> {
        let sent = tokio::time::timeout(
            self.timeout,
            self.gateway.send(contact, &self.origin, message),
        )
        .await;
        match sent {
            Ok(Ok(token)) => {
                info!("通知を送信しました: {} ({})", contact, token);
                Ok(token)
            }
            Ok(Err(e)) => {
                error!("通知の送信に失敗しました: {}: {}", contact, e);
                Err(e.into())
            }
            Err(_) => {
                error!("通知の送信がタイムアウトしました: {}", contact);
                Err(NotificationError::Timeout(self.timeout.as_secs()))
            }
        }
    }
}

/// 予約確認メッセージ
pub fn confirmation_message(booking: &Booking) -> String {
    format!(
        "Hello {},\n\
         Your booking for a {} is confirmed.\n\
         Service Type: {}\n\
         Contact: {}\n\
         Total Cost: {}{}\n\
         Thank you for choosing our Garage Services!",
        booking.name(),
        booking.vehicle().label(),
        booking.service_label(),
        booking.contact(),
        booking.cost().currency().symbol(),
        booking.cost().to_decimal_string(),
    )
}
