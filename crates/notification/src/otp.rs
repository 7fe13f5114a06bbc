use time::OffsetDateTime;

use crate::template;

/// Why a one-time passcode is being mailed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    /// Confirming the email of an account that already exists.
    Verify,
    /// Confirming the email before the account is created.
    Signup,
}

#[derive(askama::Template)]
#[template(path = "otp.html")]
struct OtpHtmlTemplate<'a> {
    username: &'a str,
    code: &'a str,
    signup: bool,
    resent: bool,
    expires_in_minutes: i64,
    year: i32,
}

#[derive(askama::Template)]
#[template(path = "otp.txt")]
struct OtpPlainTemplate<'a> {
    username: &'a str,
    code: &'a str,
    signup: bool,
    resent: bool,
    expires_in_minutes: i64,
}

pub struct OtpEmail {
    pub subject: String,
    pub html: String,
    pub plain: String,
}

impl OtpEmail {
    pub fn new(
        purpose: OtpPurpose,
        resent: bool,
        username: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Self {
        let signup = purpose == OtpPurpose::Signup;
        let subject = match (purpose, resent) {
            (OtpPurpose::Verify, false) => "MealMate - Email Verification OTP",
            (OtpPurpose::Verify, true) => "MealMate - Email Verification OTP (Resent)",
            (OtpPurpose::Signup, false) => "MealMate - Verify Your Email to Complete Signup",
            (OtpPurpose::Signup, true) => "MealMate - Verify Your Email (OTP Resent)",
        };

        let html = template::to_string(OtpHtmlTemplate {
            username,
            code,
            signup,
            resent,
            expires_in_minutes,
            year: OffsetDateTime::now_utc().year(),
        });

        let plain = template::to_string(OtpPlainTemplate {
            username,
            code,
            signup,
            resent,
            expires_in_minutes,
        });

        Self {
            subject: subject.to_owned(),
            html,
            plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_email_contains_code() {
        let email = OtpEmail::new(OtpPurpose::Signup, false, "alice", "012345", 10);

        assert_eq!(
            email.subject,
            "MealMate - Verify Your Email to Complete Signup"
        );
        assert!(email.plain.contains("012345"));
        assert!(email.plain.contains("Hello alice"));
        assert!(email.plain.contains("Welcome to MealMate"));
        assert!(email.html.contains("012345"));
    }

    #[test]
    fn resent_email_mentions_new_code() {
        let email = OtpEmail::new(OtpPurpose::Verify, true, "bob", "999999", 10);

        assert_eq!(email.subject, "MealMate - Email Verification OTP (Resent)");
        assert!(email.plain.contains("Your new OTP"));
        assert!(email.plain.contains("expire in 10 minutes"));
    }
}
