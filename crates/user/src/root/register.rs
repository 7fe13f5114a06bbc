use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use validator::Validate;

use crate::repository::{self, CreateInput};

/// Direct account creation, bypassing email confirmation.
#[derive(Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

pub(crate) fn hash_password(password: &str) -> mealmate_shared::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
}

impl super::Command {
    pub async fn register(&self, input: RegisterInput) -> mealmate_shared::Result<i64> {
        input.validate()?;

        if repository::is_username_exists(&self.read_db, &input.username).await? {
            mealmate_shared::user!("Username already exists.");
        }

        if repository::is_email_exists(&self.read_db, &input.email).await? {
            mealmate_shared::user!("Email already registered.");
        }

        let password_hash = hash_password(&input.password)?;

        repository::create(
            &self.write_db,
            CreateInput {
                username: input.username,
                email: input.email,
                password_hash,
                email_verified: false,
            },
        )
        .await
    }
}
