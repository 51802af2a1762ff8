// server/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use eshop::models::Role;
use eshop::Identity;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::auth;
use crate::state::AppState;
use crate::web::extractors::SessionUser;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct SignupRequestPayload {
  pub email: String,
  pub password: String,
  pub role: Role,
}

#[derive(Deserialize, Debug)]
pub struct SigninRequestPayload {
  pub email: String,
  pub password: String,
}

// --- Handler Implementations ---

#[instrument(
    name = "handler::signup",
    skip(app_state, req_payload),
    fields(req_email = %req_payload.email, req_role = ?req_payload.role)
)]
pub async fn signup_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<SignupRequestPayload>,
) -> Result<HttpResponse, AppError> {
  info!("Signup attempt for email: {}", req_payload.email);

  let user = auth::signup(
    app_state.users.as_ref(),
    &req_payload.email,
    &req_payload.password,
    req_payload.role,
  )
  .await?;

  // Signup does not open a session; the client proceeds to /auth/signin.
  Ok(HttpResponse::Created().json(json!({
      "message": "Account created successfully. Please sign in.",
      "userId": user.id.to_string(),
      "email": user.email,
      "role": user.role,
  })))
}

#[instrument(
    name = "handler::signin",
    skip(app_state, req_payload),
    fields(req_email = %req_payload.email)
)]
pub async fn signin_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<SigninRequestPayload>,
) -> Result<HttpResponse, AppError> {
  info!("Signin attempt for email: {}", req_payload.email);

  let user = auth::signin(app_state.users.as_ref(), &req_payload.email, &req_payload.password).await?;

  let identity = Identity {
    user_id: user.id,
    role: user.role,
  };
  let session = app_state.sessions.create(identity, app_state.cart_store.clone());

  info!(user_id = %user.id, "signin successful, session opened");

  Ok(HttpResponse::Ok().json(json!({
      "token": session.token.to_string(),
      "user": {
          "id": user.id.to_string(),
          "email": user.email,
          "role": user.role,
      },
  })))
}

#[instrument(name = "handler::signout", skip(app_state, session_user), fields(token = %session_user.0.token))]
pub async fn signout_handler(
  app_state: web::Data<AppState>,
  session_user: SessionUser,
) -> Result<HttpResponse, AppError> {
  app_state.sessions.remove(session_user.0.token);
  Ok(HttpResponse::Ok().json(json!({ "message": "Signed out." })))
}
