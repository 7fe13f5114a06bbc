use validator::Validate;

use crate::repository;

#[derive(Validate)]
pub struct UpdateProfileInput {
    #[validate(length(max = 500))]
    pub bio: String,
}

impl super::Command {
    pub async fn update_profile(
        &self,
        id: i64,
        input: UpdateProfileInput,
    ) -> mealmate_shared::Result<()> {
        input.validate()?;

        if repository::find(&self.read_db, repository::FindType::Id(id))
            .await?
            .is_none()
        {
            mealmate_shared::not_found!("User not found");
        }

        repository::update_bio(&self.write_db, id, input.bio.trim().to_owned()).await
    }

    /// Removes the account; recipes, plans, lists and passcodes go with it.
    #[tracing::instrument(skip(self))]
    pub async fn delete_account(&self, id: i64) -> mealmate_shared::Result<()> {
        if repository::delete(&self.write_db, id).await? == 0 {
            mealmate_shared::not_found!("User not found");
        }

        tracing::info!("Account deleted");

        Ok(())
    }
}
