pub mod core;
pub mod desk;
pub mod notification;

use std::error::Error;

use derive_more::Display;
use thiserror::Error;

pub type BoxError = Box<dyn Error + Send + Sync>;

/// 永続化エラー
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    ConnectionError(BoxError),
    #[error("Database query error: {0}")]
    QueryError(BoxError),
    #[error("Data write error: {0}")]
    WriteError(BoxError),
    #[error("Database did not answer within {0} seconds")]
    Timeout(u64),
}

/// 入力エラー
#[derive(derive_more::Error, Display, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 名前が空欄です
    #[display(fmt = "Name cannot be blank")]
    NameIsBlank,
    /// 連絡先が空欄です
    #[display(fmt = "Contact cannot be blank")]
    ContactIsBlank,
    /// 車種が不明です
    #[display(fmt = "Unrecognized vehicle type: {:?}", _0)]
    UnrecognizedVehicle(#[error(not(source))] String),
    /// フィードバックが空欄です
    #[display(fmt = "Feedback cannot be blank")]
    FeedbackIsBlank,
}

/// 受付エラー
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
