use std::time::{SystemTime, UNIX_EPOCH};

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::JwtConfig, error::AppError, routes::AppState};

pub const AUTH_COOKIE_NAME: &str = "auth_token";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    aud: String,
    exp: u64,
    iat: u64,
    iss: String,
    sub: String,
}

pub fn generate_token(config: &JwtConfig, user_id: i64) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let claims = Claims {
        aud: config.audience.to_owned(),
        exp: now + config.expiration_days * 24 * 60 * 60,
        iat: now,
        iss: config.issuer.to_owned(),
        sub: user_id.to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

/// Decodes a token and returns the user id it was issued for.
pub fn verify_token(config: &JwtConfig, token: &str) -> Option<i64> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.to_owned()]);
    validation.set_audience(&[config.audience.to_owned()]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .ok()?;

    data.claims.sub.parse().ok()
}

pub fn build_cookie<'a>(config: &JwtConfig, user_id: i64) -> anyhow::Result<Cookie<'a>> {
    let token = generate_token(config, user_id)?;

    Ok(Cookie::build((AUTH_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build())
}

pub fn removal_cookie<'a>() -> Cookie<'a> {
    Cookie::build(AUTH_COOKIE_NAME).path("/").build()
}

pub struct AuthUser(pub mealmate_user::User);

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Unauthorized)?;

        let user_id = jar
            .get(AUTH_COOKIE_NAME)
            .and_then(|cookie| verify_token(&state.config.jwt, cookie.value()))
            .ok_or(AppError::Unauthorized)?;

        let Some(user) = state.user_query.find_by_id(user_id).await? else {
            return Err(AppError::Unauthorized);
        };

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "a-very-long-secret-for-testing-purposes".to_owned(),
            issuer: "mealmate".to_owned(),
            audience: "mealmate-web".to_owned(),
            expiration_days: 7,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let config = config();
        let token = generate_token(&config, 42).unwrap();

        assert_eq!(verify_token(&config, &token), Some(42));
    }

    #[test]
    fn test_token_rejected_for_other_audience() {
        let token = generate_token(&config(), 42).unwrap();
        let other = JwtConfig {
            audience: "someone-else".to_owned(),
            ..config()
        };

        assert_eq!(verify_token(&other, &token), None);
        assert_eq!(verify_token(&config(), "garbage"), None);
    }
}
