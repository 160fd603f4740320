use super::json_body;
use crate::errors::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::Deserialize;
use snapix_application::auth::{RecoverPasswordCommand, ResendConfirmationCodeCommand};
use snapix_application::command_bus::CommandBus;
use snapix_application::context::AppContext;
use snapix_domain::user::Email;

#[derive(Debug, Deserialize)]
pub struct EmailDto {
    pub email: String,
}

pub async fn resend_confirmation_code(
    State(state): State<AppState>,
    body: Result<Json<EmailDto>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let email = Email::parse(json_body(body)?.email)?;
    state
        .commands
        .dispatch(
            &AppContext::default(),
            ResendConfirmationCodeCommand { email },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn recover_password(
    State(state): State<AppState>,
    body: Result<Json<EmailDto>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let email = Email::parse(json_body(body)?.email)?;
    state
        .commands
        .dispatch(&AppContext::default(), RecoverPasswordCommand { email })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
