//! One-time passcodes confirming control of an email address.
//!
//! A passcode is issued for an email (and optionally an existing account),
//! lives for [`OTP_TTL_SECS`] and can be consumed once. Wrong input leaves it
//! usable until it expires. Resending issues a fresh record and leaves the old
//! one untouched.

mod command;
pub(crate) mod repository;

use mealmate_shared::OtpError;
use rand::Rng;
use serde::Serialize;
use sqlx::prelude::FromRow;

pub const OTP_LENGTH: usize = 6;
pub const OTP_TTL_SECS: i64 = 10 * 60;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Otp {
    pub id: i64,
    pub user_id: Option<i64>,
    pub email: String,
    #[serde(skip)]
    pub code: String,
    pub is_verified: bool,
    pub created_at: i64,
    pub expires_at: i64,
}

impl Otp {
    pub fn is_expired(&self, now: i64) -> bool {
        now > self.expires_at
    }

    /// Checks `input` against this passcode without consuming it.
    pub fn check(&self, input: &str, now: i64) -> Result<(), OtpError> {
        if self.is_expired(now) {
            return Err(OtpError::Expired);
        }

        if self.is_verified {
            return Err(OtpError::AlreadyUsed);
        }

        if input.trim() != self.code {
            return Err(OtpError::Mismatch);
        }

        Ok(())
    }
}

/// Uniformly random numeric code, leading zeros kept.
pub fn generate_code() -> String {
    let value = rand::rng().random_range(0..10u32.pow(OTP_LENGTH as u32));

    format!("{value:0width$}", width = OTP_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn otp(is_verified: bool) -> Otp {
        Otp {
            id: 1,
            user_id: None,
            email: "john@mealmate.localhost".to_owned(),
            code: "042042".to_owned(),
            is_verified,
            created_at: 1_000,
            expires_at: 1_000 + OTP_TTL_SECS,
        }
    }

    #[test]
    fn generated_code_has_six_digits() {
        for _ in 0..200 {
            let code = generate_code();
            assert_eq!(code.len(), OTP_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn accepts_trimmed_input() {
        assert_eq!(otp(false).check(" 042042\n", 1_010), Ok(()));
    }

    #[test]
    fn still_valid_at_expiry_instant() {
        assert_eq!(otp(false).check("042042", 1_000 + OTP_TTL_SECS), Ok(()));
    }

    #[test]
    fn expiry_wins_over_everything() {
        let now = 1_000 + OTP_TTL_SECS + 1;
        assert_eq!(otp(false).check("042042", now), Err(OtpError::Expired));
        assert_eq!(otp(true).check("000000", now), Err(OtpError::Expired));
    }

    #[test]
    fn already_used_before_mismatch() {
        assert_eq!(otp(true).check("000000", 1_010), Err(OtpError::AlreadyUsed));
        assert_eq!(otp(true).check("042042", 1_010), Err(OtpError::AlreadyUsed));
    }

    #[test]
    fn wrong_code_is_mismatch() {
        assert_eq!(otp(false).check("42042", 1_010), Err(OtpError::Mismatch));
    }
}
