//! Bearer 令牌认证
//!
//! 访问令牌为 HS256 签名的 JWT，载荷形如 `{"user": {"id": 1}, "iat": ..., "exp": ...}`。
//! 需要认证的路由在参数中声明 [`AuthUser`] 即可；缺失或无效的令牌返回 401。
//!
use crate::config::{AppConfig, ConfigError};
use crate::errors::ApiError;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use snapix_application::context::AppContext;
use snapix_domain::user::UserId;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUser {
    pub id: i64,
}

/// 访问令牌载荷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtAtPayload {
    pub user: TokenUser,
    pub iat: i64,
    pub exp: i64,
}

/// 令牌校验端口
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<JwtAtPayload, jsonwebtoken::errors::Error>;
}

/// HS256 访问令牌的签发与校验
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.access_token_secret()?,
            config.access_token_expires_in()?,
        ))
    }

    pub fn sign(&self, user_id: UserId) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = JwtAtPayload {
            user: TokenUser { id: user_id.value() },
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }
}

impl TokenVerifier for JwtKeys {
    fn verify(&self, token: &str) -> Result<JwtAtPayload, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<JwtAtPayload>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
    }
}

/// 已认证的调用者
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    request_id: Option<String>,
}

impl AuthUser {
    pub fn context(&self) -> AppContext {
        AppContext::for_user(self.user_id, self.request_id.clone())
    }
}

pub(crate) fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(ApiError::unauthorized)?;
    let header = header.to_str().map_err(|_| ApiError::unauthorized())?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(ApiError::unauthorized)?
        .trim();
    if token.is_empty() {
        return Err(ApiError::unauthorized());
    }
    Ok(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(&parts.headers)?;
        let claims = state.tokens.verify(token).map_err(|err| {
            tracing::debug!(error = %err, "rejected bearer token");
            ApiError::unauthorized()
        })?;

        Ok(Self {
            user_id: UserId::new(claims.user.id),
            request_id: request_id(&parts.headers),
        })
    }
}
