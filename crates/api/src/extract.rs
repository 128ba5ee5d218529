//! JSON body and query extractors that reject with [`AppError`].
//!
//! Axum's stock extractors answer malformed input with plain-text 4xx bodies.
//! These wrappers route the rejection through [`AppError::BadRequest`] so
//! every input error is a 400 with the usual `{ "error", "code" }` body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json` with [`AppError`] rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` with [`AppError`] rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
