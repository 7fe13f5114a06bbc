use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use mealmate_user::{LoginInput, PendingSignup, SignupInput, UpdateProfileInput};
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::{self, AuthUser},
    error::{AppError, AppResult},
    routes::AppState,
    session::{SIGNUP_COOKIE_NAME, SIGNUP_TTL},
};

#[derive(Deserialize)]
pub struct SignupPayload {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Deserialize)]
pub struct OtpPayload {
    pub otp: String,
}

#[derive(Deserialize)]
pub struct LoginPayload {
    pub login: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct EmailPayload {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ProfilePayload {
    #[serde(default)]
    pub bio: String,
}

fn session_expired() -> AppError {
    AppError::BadRequest("Signup session expired. Please sign up again.".to_owned())
}

async fn pending_signup(state: &AppState, jar: &CookieJar) -> AppResult<(String, PendingSignup)> {
    let key = jar
        .get(SIGNUP_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
        .ok_or_else(session_expired)?;

    let pending = state.sessions.get(&key).await.ok_or_else(session_expired)?;

    Ok((key, pending))
}

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<SignupPayload>,
) -> AppResult<impl IntoResponse> {
    let (pending, otp_id) = state
        .user_command
        .start_signup(SignupInput {
            username: input.username,
            email: input.email,
            password: input.password,
            confirm_password: input.confirm_password,
        })
        .await?;

    let email = pending.email.to_owned();
    let key = state.sessions.insert(pending).await;
    let max_age = time::Duration::seconds(SIGNUP_TTL.as_secs() as i64);
    let cookie = Cookie::build((SIGNUP_COOKIE_NAME, key))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(max_age)
        .build();

    Ok((jar.add(cookie), Json(json!({"otp_id": otp_id, "email": email}))))
}

pub async fn signup_verify(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(otp_id): Path<i64>,
    Json(input): Json<OtpPayload>,
) -> AppResult<impl IntoResponse> {
    let (key, pending) = pending_signup(&state, &jar).await?;

    let user_id = state
        .user_command
        .complete_signup(&pending, otp_id, input.otp.trim())
        .await?;

    state.sessions.remove(&key).await;
    let auth_cookie = auth::build_cookie(&state.config.jwt, user_id)?;
    let jar = jar
        .remove(Cookie::build(SIGNUP_COOKIE_NAME).path("/"))
        .add(auth_cookie);

    Ok((jar, Json(json!({"user_id": user_id}))))
}

pub async fn signup_resend(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(otp_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let (_, pending) = pending_signup(&state, &jar).await?;

    let otp_id = state
        .user_command
        .resend_signup_otp(&pending, otp_id)
        .await?;

    Ok(Json(json!({"otp_id": otp_id})))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginPayload>,
) -> AppResult<impl IntoResponse> {
    let user_id = state
        .user_command
        .login(LoginInput {
            login: input.login,
            password: input.password,
        })
        .await?;

    let cookie = auth::build_cookie(&state.config.jwt, user_id)?;

    Ok((jar.add(cookie), Json(json!({"user_id": user_id}))))
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.remove(auth::removal_cookie()),
        Json(json!({"status": "logged_out"})),
    )
}

pub async fn otp_send(
    State(state): State<AppState>,
    Json(input): Json<EmailPayload>,
) -> AppResult<impl IntoResponse> {
    let otp_id = state.user_command.send_for_email(input.email.trim()).await?;

    Ok(Json(json!({"otp_id": otp_id})))
}

pub async fn otp_verify(
    State(state): State<AppState>,
    Path(otp_id): Path<i64>,
    Json(input): Json<OtpPayload>,
) -> AppResult<impl IntoResponse> {
    let otp = state
        .user_command
        .verify_otp(otp_id, input.otp.trim())
        .await?;

    Ok(Json(json!({"verified": true, "email": otp.email})))
}

pub async fn otp_resend(
    State(state): State<AppState>,
    Path(otp_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let otp_id = state.user_command.resend_otp(otp_id).await?;

    Ok(Json(json!({"otp_id": otp_id})))
}

pub async fn profile(AuthUser(user): AuthUser) -> impl IntoResponse {
    Json(user)
}

pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ProfilePayload>,
) -> AppResult<impl IntoResponse> {
    state
        .user_command
        .update_profile(user.id(), UpdateProfileInput { bio: input.bio })
        .await?;

    let user = state
        .user_query
        .find_by_id(user.id())
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(user))
}

pub async fn delete_account(
    State(state): State<AppState>,
    jar: CookieJar,
    user: AuthUser,
) -> AppResult<impl IntoResponse> {
    state.user_command.delete_account(user.id()).await?;

    Ok((
        jar.remove(auth::removal_cookie()),
        Json(json!({"status": "deleted"})),
    ))
}
