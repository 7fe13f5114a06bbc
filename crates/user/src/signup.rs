use std::sync::LazyLock;

use mealmate_notification::OtpPurpose;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    otp::repository as otp_repository,
    repository::{self, CreateInput},
    root::hash_password,
};

static RE_USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("valid username regex"));

#[derive(Validate)]
pub struct SignupInput {
    #[validate(
        length(max = 150),
        regex(
            path = *RE_USERNAME,
            message = "Letters, digits and @/./+/-/_ only."
        )
    )]
    pub username: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Account data held between signup and email confirmation. Only the password
/// hash is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingSignup {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl crate::Command {
    /// Validates the request and mails a passcode. Nothing but the passcode is
    /// stored; the returned pending signup must be kept by the caller.
    #[tracing::instrument(skip_all, fields(email = %input.email))]
    pub async fn start_signup(
        &self,
        input: SignupInput,
    ) -> mealmate_shared::Result<(PendingSignup, i64)> {
        let input = SignupInput {
            username: input.username.trim().to_owned(),
            email: input.email.trim().to_owned(),
            ..input
        };

        if input.username.is_empty()
            || input.email.is_empty()
            || input.password.is_empty()
            || input.confirm_password.is_empty()
        {
            mealmate_shared::user!("All fields are required.");
        }

        if input.password != input.confirm_password {
            mealmate_shared::user!("Passwords do not match.");
        }

        if input.password.chars().count() < 8 {
            mealmate_shared::user!("Password must be at least 8 characters long.");
        }

        input.validate()?;

        if repository::is_username_exists(&self.read_db, &input.username).await? {
            mealmate_shared::user!("Username already exists.");
        }

        if repository::is_email_exists(&self.read_db, &input.email).await? {
            mealmate_shared::user!("Email already registered.");
        }

        let pending = PendingSignup {
            password_hash: hash_password(&input.password)?,
            username: input.username,
            email: input.email,
        };

        let otp_id = self
            .issue_otp(
                None,
                &pending.email,
                &pending.username,
                OtpPurpose::Signup,
                false,
            )
            .await?;

        Ok((pending, otp_id))
    }

    /// Sends a fresh signup passcode to the email of `otp_id`.
    pub async fn resend_signup_otp(
        &self,
        pending: &PendingSignup,
        otp_id: i64,
    ) -> mealmate_shared::Result<i64> {
        let Some(old) = otp_repository::find(&self.read_db, otp_id).await? else {
            mealmate_shared::not_found!("Invalid OTP request");
        };

        self.issue_otp(
            None,
            &old.email,
            &pending.username,
            OtpPurpose::Signup,
            true,
        )
        .await
    }

    pub async fn complete_signup(
        &self,
        pending: &PendingSignup,
        otp_id: i64,
        code: &str,
    ) -> mealmate_shared::Result<i64> {
        self.complete_signup_at(pending, otp_id, code, mealmate_shared::now())
            .await
    }

    /// Consumes the passcode and creates the verified account in a single
    /// transaction. Returns the new user id.
    #[tracing::instrument(skip(self, pending, code), fields(email = %pending.email))]
    pub async fn complete_signup_at(
        &self,
        pending: &PendingSignup,
        otp_id: i64,
        code: &str,
        now: i64,
    ) -> mealmate_shared::Result<i64> {
        let otp = match otp_repository::find(&self.read_db, otp_id).await? {
            Some(otp) if !otp.is_verified => otp,
            _ => mealmate_shared::not_found!("Invalid or expired OTP request"),
        };

        if otp.email != pending.email {
            mealmate_shared::user!("Email mismatch. Please sign up again.");
        }

        otp.check(code, now)?;

        if repository::is_username_exists(&self.read_db, &pending.username).await? {
            mealmate_shared::user!("Username already exists.");
        }

        if repository::is_email_exists(&self.read_db, &pending.email).await? {
            mealmate_shared::user!("Email already registered.");
        }

        let mut tx = self.write_db.begin().await?;

        if !otp_repository::mark_verified(&mut *tx, otp.id).await? {
            return Err(mealmate_shared::OtpError::AlreadyUsed.into());
        }

        let user_id = repository::create(
            &mut *tx,
            CreateInput {
                username: pending.username.to_owned(),
                email: pending.email.to_owned(),
                password_hash: pending.password_hash.to_owned(),
                email_verified: true,
            },
        )
        .await?;

        otp_repository::set_user(&mut *tx, otp.id, user_id).await?;

        tx.commit().await?;

        tracing::info!(user_id, "Signup completed");

        Ok(user_id)
    }
}
