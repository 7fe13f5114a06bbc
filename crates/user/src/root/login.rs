use argon2::{Argon2, PasswordHash, PasswordVerifier};
use validator::Validate;

use crate::repository;

#[derive(Validate)]
pub struct LoginInput {
    /// Email address or username.
    #[validate(length(min = 1))]
    pub login: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl super::Command {
    pub async fn login(&self, input: LoginInput) -> mealmate_shared::Result<i64> {
        input.validate()?;

        let Some(user_row) = repository::find(
            &self.read_db,
            repository::FindType::Login(input.login.trim().to_owned()),
        )
        .await?
        else {
            mealmate_shared::user!("Invalid credentials");
        };

        let parsed_hash = PasswordHash::new(&user_row.password)?;
        let argon2 = Argon2::default();

        if argon2
            .verify_password(input.password.as_bytes(), &parsed_hash)
            .is_err()
        {
            mealmate_shared::user!("Invalid credentials");
        }

        tracing::info!(user_id = user_row.id, "User logged in");

        Ok(user_row.id)
    }
}
