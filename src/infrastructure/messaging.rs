use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    domain::notification::{DeliveryToken, GatewayError, MessagingGateway},
    Messaging,
};

impl From<reqwest::Error> for GatewayError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::InvalidResponse(Box::new(value))
        } else {
            Self::Unreachable(Box::new(value))
        }
    }
}

/// Twilio 送信ゲートウェイ
#[derive(Clone)]
pub struct TwilioGateway {
    client: reqwest::Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
}

#[derive(Deserialize)]
struct MessageResource {
    sid: String,
}

#[derive(Deserialize)]
struct ErrorResource {
    message: String,
}

impl TwilioGateway {
    pub fn new(config: &Messaging) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        )
    }
}

#[async_trait]
impl MessagingGateway for TwilioGateway {
    async fn send(
        &self,
        destination: &str,
        origin: &str,
        body: &str,
    ) -> Result<DeliveryToken, GatewayError> {
        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", destination), ("From", origin), ("Body", body)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let reason = match response.json::<ErrorResource>().await {
                Ok(error) => error.message,
                Err(_) => status.to_string(),
            };
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }
        let message = response.json::<MessageResource>().await?;
        Ok(DeliveryToken::from(message.sid))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        net::{SocketAddr, TcpListener},
    };

    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::post,
        Form, Json, Router,
    };
    use serde_json::{json, Value};

    use super::*;

    // "AC123:secret"
    const BASIC_AUTH: &str = "Basic QUMxMjM6c2VjcmV0";

    async fn messages(
        Path(account): Path<String>,
        headers: HeaderMap,
        Form(form): Form<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some(BASIC_AUTH) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"code": 20003, "message": "Authenticate", "status": 401})),
            );
        }
        if !form.get("To").is_some_and(|to| to.starts_with('+')) {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "code": 21211,
                    "message": "The 'To' number is not a valid phone number.",
                    "status": 400
                })),
            );
        }
        (
            StatusCode::CREATED,
            Json(json!({
                "sid": format!("SM-{}-{}", account, form["From"]),
                "to": form["To"],
                "body": form["Body"],
                "status": "queued"
            })),
        )
    }

    fn spawn_provider() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route(
            "/2010-04-01/Accounts/:account/Messages.json",
            post(messages),
        );
        tokio::spawn(async move {
            axum::Server::from_tcp(listener)
                .unwrap()
                .serve(app.into_make_service())
                .await
                .unwrap();
        });
        addr
    }

    fn gateway(addr: SocketAddr, auth_token: &str) -> TwilioGateway {
        TwilioGateway::new(&Messaging {
            origin: "+12813469685".to_owned(),
            account_sid: "AC123".to_owned(),
            auth_token: auth_token.to_owned(),
            base_url: format!("http://{}/", addr),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_send() {
        let gateway = gateway(spawn_provider(), "secret");
        let token = gateway
            .send("+919998887770", "+12813469685", "Hello Asha")
            .await
            .unwrap();
        assert_eq!(token, DeliveryToken::from("SM-AC123-+12813469685"));
    }

    #[tokio::test]
    async fn test_send_bad_credentials() {
        let gateway = gateway(spawn_provider(), "wrong");
        let result = gateway.send("+919998887770", "+1", "Hello").await;
        assert!(matches!(
            result,
            Err(GatewayError::Rejected { status: 401, reason }) if reason == "Authenticate"
        ));
    }

    #[tokio::test]
    async fn test_send_invalid_destination() {
        let gateway = gateway(spawn_provider(), "secret");
        let result = gateway.send("9998887770", "+1", "Hello").await;
        assert!(matches!(
            result,
            Err(GatewayError::Rejected { status: 400, reason })
                if reason.contains("not a valid phone number")
        ));
    }

    #[tokio::test]
    async fn test_send_unreachable() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let result = gateway(addr, "secret").send("+1", "+1", "Hello").await;
        assert!(matches!(result, Err(GatewayError::Unreachable(_))));
    }
}
