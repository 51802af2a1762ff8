// server/src/web/extractors.rs

use std::sync::Arc;

use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::sessions::Session;
use crate::state::AppState;

/// Extracts the signed-in session from the `X-Session-Token` header.
///
/// Handlers taking a `SessionUser` are implicitly auth-protected: requests
/// without a live session never reach them.
#[derive(Clone)]
pub struct SessionUser(pub Arc<Session>);

impl FromRequest for SessionUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let token = req
      .headers()
      .get("X-Session-Token")
      .and_then(|value| value.to_str().ok())
      .and_then(|value| Uuid::parse_str(value).ok());

    let Some(token) = token else {
      warn!("SessionUser extractor: missing or invalid X-Session-Token header.");
      return ready(Err(AppError::Auth(
        "User authentication required. Missing or invalid X-Session-Token header.".to_string(),
      )));
    };

    let Some(state) = req.app_data::<web::Data<AppState>>() else {
      return ready(Err(AppError::Internal("Application state unavailable.".to_string())));
    };

    match state.sessions.get(token) {
      Some(session) => ready(Ok(SessionUser(session))),
      None => ready(Err(AppError::Auth(
        "Session expired or unknown. Please sign in again.".to_string(),
      ))),
    }
  }
}
