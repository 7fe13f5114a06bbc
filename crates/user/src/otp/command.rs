use mealmate_notification::{OtpEmail, OtpPurpose};
use mealmate_shared::OtpError;

use super::{OTP_TTL_SECS, Otp, generate_code, repository as otp_repository};
use crate::repository;

impl crate::Command {
    /// Persists a new passcode and mails it. The record is removed again when
    /// delivery fails, and the delivery error is returned as is.
    #[tracing::instrument(skip(self, username))]
    pub(crate) async fn issue_otp(
        &self,
        user_id: Option<i64>,
        email: &str,
        username: &str,
        purpose: OtpPurpose,
        resent: bool,
    ) -> mealmate_shared::Result<i64> {
        let code = generate_code();
        let id = otp_repository::create(
            &self.write_db,
            user_id,
            email,
            &code,
            mealmate_shared::now(),
        )
        .await?;

        let message = OtpEmail::new(purpose, resent, username, &code, OTP_TTL_SECS / 60);

        if let Err(err) = self
            .mailer
            .send(email, &message.subject, message.html, message.plain)
            .await
        {
            tracing::warn!(otp_id = id, error = %err, "OTP delivery failed");
            if let Err(e) = otp_repository::delete(&self.write_db, id).await {
                tracing::error!(otp_id = id, error = %e, "Failed to remove undelivered OTP");
            }

            return Err(mealmate_shared::Error::Email(err.to_string()));
        }

        tracing::info!(otp_id = id, "OTP sent");

        Ok(id)
    }

    /// Sends a passcode to the owner of an existing account.
    pub async fn send_for_email(&self, email: impl Into<String>) -> mealmate_shared::Result<i64> {
        let email = email.into();
        let Some(user) =
            repository::find(&self.read_db, repository::FindType::Email(email.trim().to_owned()))
                .await?
        else {
            mealmate_shared::not_found!("No account found with this email");
        };

        self.issue_otp(
            Some(user.id),
            &user.email,
            &user.username,
            OtpPurpose::Verify,
            false,
        )
        .await
    }

    /// Issues a replacement for `otp_id`, bound to the same email and account.
    pub async fn resend_otp(&self, otp_id: i64) -> mealmate_shared::Result<i64> {
        let Some(old) = otp_repository::find(&self.read_db, otp_id).await? else {
            mealmate_shared::not_found!("Invalid OTP request");
        };

        let username = match old.user_id {
            Some(user_id) => repository::find(&self.read_db, repository::FindType::Id(user_id))
                .await?
                .map(|user| user.username),
            None => None,
        };

        self.issue_otp(
            old.user_id,
            &old.email,
            username.as_deref().unwrap_or(&old.email),
            OtpPurpose::Verify,
            true,
        )
        .await
    }

    pub async fn verify_otp(&self, otp_id: i64, code: &str) -> mealmate_shared::Result<Otp> {
        self.verify_otp_at(otp_id, code, mealmate_shared::now()).await
    }

    /// Consumes the passcode as of `now`; the linked account, if any, gets its
    /// email marked as verified.
    pub async fn verify_otp_at(
        &self,
        otp_id: i64,
        code: &str,
        now: i64,
    ) -> mealmate_shared::Result<Otp> {
        let Some(mut otp) = otp_repository::find(&self.read_db, otp_id).await? else {
            mealmate_shared::not_found!("Invalid or expired OTP request");
        };

        otp.check(code, now)?;

        let mut tx = self.write_db.begin().await?;

        if !otp_repository::mark_verified(&mut *tx, otp.id).await? {
            return Err(OtpError::AlreadyUsed.into());
        }

        if let Some(user_id) = otp.user_id {
            repository::set_email_verified(&mut *tx, user_id).await?;
        }

        tx.commit().await?;

        otp.is_verified = true;

        Ok(otp)
    }
}
