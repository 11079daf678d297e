use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use garage::domain::{
    core::{Booking, BookingForm, Feedback, Money, VehicleClass},
    desk::{BookingOutcome, NotificationOutcome, ServiceDesk},
    SubmissionError,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub fn router(desk: Arc<ServiceDesk>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/quote", get(quote))
        .route("/api/bookings", post(book))
        .route("/api/feedback", post(feedback))
        .with_state(desk)
}

pub struct ApiError(SubmissionError);

impl From<SubmissionError> for ApiError {
    fn from(value: SubmissionError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SubmissionError::Validation(_) => StatusCode::BAD_REQUEST,
            SubmissionError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[derive(Serialize)]
struct Amount {
    cost: String,
    display: String,
}

impl From<Money> for Amount {
    fn from(value: Money) -> Self {
        Self {
            cost: value.to_decimal_string(),
            display: value.to_string(),
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": "Garage Services API" }))
}

#[derive(Deserialize)]
struct QuoteParams {
    #[serde(default)]
    vehicle: String,
    #[serde(default)]
    premium: bool,
}

#[derive(Serialize)]
struct QuoteView {
    vehicle: Option<VehicleClass>,
    premium: bool,
    recognized: bool,
    #[serde(flatten)]
    amount: Amount,
}

async fn quote(
    State(desk): State<Arc<ServiceDesk>>,
    Query(params): Query<QuoteParams>,
) -> Json<QuoteView> {
    let quote = desk.quote(&params.vehicle, params.premium);
    Json(QuoteView {
        vehicle: params.vehicle.parse().ok(),
        premium: params.premium,
        recognized: quote.recognized,
        amount: quote.cost.into(),
    })
}

#[derive(Serialize)]
struct BookingView {
    name: String,
    contact: String,
    vehicle: VehicleClass,
    service: &'static str,
    #[serde(flatten)]
    amount: Amount,
    booked_at: String,
}

impl From<&Booking> for BookingView {
    fn from(value: &Booking) -> Self {
        Self {
            name: value.name().to_owned(),
            contact: value.contact().to_owned(),
            vehicle: value.vehicle(),
            service: value.service_label(),
            amount: value.cost().into(),
            booked_at: value.booked_at().to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum NotificationView {
    Delivered { token: String },
    Failed { error: String },
}

impl From<&NotificationOutcome> for NotificationView {
    fn from(value: &NotificationOutcome) -> Self {
        match value {
            NotificationOutcome::Delivered { token } => Self::Delivered {
                token: token.to_string(),
            },
            NotificationOutcome::Failed(e) => Self::Failed {
                error: e.to_string(),
            },
        }
    }
}

#[derive(Serialize)]
struct BookedView {
    booking: BookingView,
    notification: NotificationView,
}

async fn book(
    State(desk): State<Arc<ServiceDesk>>,
    Json(form): Json<BookingForm>,
) -> Result<(StatusCode, Json<BookedView>), ApiError> {
    let BookingOutcome {
        booking,
        notification,
    } = desk.submit_booking(&form).await?;
    Ok((
        StatusCode::CREATED,
        Json(BookedView {
            booking: (&booking).into(),
            notification: (&notification).into(),
        }),
    ))
}

#[derive(Deserialize)]
struct FeedbackForm {
    text: String,
}

#[derive(Serialize)]
struct FeedbackView {
    text: String,
    submitted_at: String,
}

impl From<&Feedback> for FeedbackView {
    fn from(value: &Feedback) -> Self {
        Self {
            text: value.text().to_owned(),
            submitted_at: value.submitted_at().to_rfc3339(),
        }
    }
}

async fn feedback(
    State(desk): State<Arc<ServiceDesk>>,
    Json(form): Json<FeedbackForm>,
) -> Result<(StatusCode, Json<FeedbackView>), ApiError> {
    let feedback = desk.submit_feedback(&form.text).await?;
    Ok((StatusCode::CREATED, Json((&feedback).into())))
}
