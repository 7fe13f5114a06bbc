use std::ops::Deref;

use serde::Serialize;

use crate::repository::{self, FindType, UserRow};

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub email_verified: bool,
    pub bio: String,
    pub created_at: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            email_verified: row.email_verified,
            bio: row.bio,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct Query(pub mealmate_shared::State);

impl Deref for Query {
    type Target = mealmate_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Query {
    pub async fn find_by_id(&self, id: i64) -> mealmate_shared::Result<Option<User>> {
        self.find(FindType::Id(id)).await
    }

    pub async fn find_by_username(
        &self,
        username: impl Into<String>,
    ) -> mealmate_shared::Result<Option<User>> {
        self.find(FindType::Username(username.into())).await
    }

    pub async fn find_by_email(
        &self,
        email: impl Into<String>,
    ) -> mealmate_shared::Result<Option<User>> {
        self.find(FindType::Email(email.into())).await
    }

    async fn find(&self, find_type: FindType) -> mealmate_shared::Result<Option<User>> {
        Ok(repository::find(&self.read_db, find_type)
            .await?
            .map(User::from))
    }
}
