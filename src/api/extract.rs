//! Extractors whose rejections render as `CheckerError`

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::CheckerError;

/// `axum::Json` with a `{"detail": ...}` rejection
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(CheckerError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` with a `{"detail": ...}` rejection
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(CheckerError))]
pub struct ApiQuery<T>(pub T);
