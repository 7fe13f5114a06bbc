use std::{ops::Deref, sync::Arc};

use mealmate_notification::Mailer;

mod login;
mod profile;
mod register;

pub use login::LoginInput;
pub use profile::UpdateProfileInput;
pub use register::RegisterInput;
pub(crate) use register::hash_password;

#[derive(Clone)]
pub struct Command {
    state: mealmate_shared::State,
    pub(crate) mailer: Arc<dyn Mailer>,
}

impl Deref for Command {
    type Target = mealmate_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: mealmate_shared::State, mailer: Arc<dyn Mailer>) -> Self {
        Self { state, mailer }
    }
}
