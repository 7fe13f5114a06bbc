use std::{
    path::PathBuf,
    str::FromStr,
    sync::{Arc, Mutex},
};

use mealmate_notification::Mailer;
use mealmate_user::RegisterInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub plain: String,
}

#[derive(Default)]
pub struct FakeMailer {
    pub sent: Mutex<Vec<SentEmail>>,
    pub failure: Mutex<Option<String>>,
}

impl FakeMailer {
    #[allow(dead_code)]
    pub fn fail_with(&self, reason: &str) {
        *self.failure.lock().unwrap() = Some(reason.to_owned());
    }

    #[allow(dead_code)]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Mailer for FakeMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        _html: String,
        plain: String,
    ) -> anyhow::Result<()> {
        if let Some(reason) = self.failure.lock().unwrap().clone() {
            anyhow::bail!(reason);
        }

        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_owned(),
            subject: subject.to_owned(),
            plain,
        });

        Ok(())
    }
}

pub struct TestState {
    pub state: mealmate_shared::State,
    pub pool: SqlitePool,
    pub mailer: Arc<FakeMailer>,
}

impl TestState {
    pub fn command(&self) -> mealmate_user::Command {
        mealmate_user::Command::new(self.state.clone(), self.mailer.clone())
    }

    #[allow(dead_code)]
    pub fn query(&self) -> mealmate_user::Query {
        mealmate_user::Query(self.state.clone())
    }
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<TestState> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    mealmate_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(TestState {
        state: mealmate_shared::State {
            read_db: pool.clone(),
            write_db: pool.clone(),
        },
        pool,
        mailer: Arc::new(FakeMailer::default()),
    })
}

#[allow(dead_code)]
pub async fn create_user(state: &TestState, name: &str) -> anyhow::Result<i64> {
    let id = state
        .command()
        .register(RegisterInput {
            username: name.to_owned(),
            email: format!("{name}@mealmate.localhost"),
            password: "my_password".to_owned(),
        })
        .await?;

    Ok(id)
}

#[allow(dead_code)]
pub async fn otp_code(state: &TestState, otp_id: i64) -> anyhow::Result<String> {
    let (code,) = sqlx::query_as::<_, (String,)>("SELECT code FROM email_otp WHERE id = ?")
        .bind(otp_id)
        .fetch_one(&state.pool)
        .await?;

    Ok(code)
}

#[allow(dead_code)]
pub async fn otp_count(state: &TestState) -> anyhow::Result<i64> {
    let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM email_otp")
        .fetch_one(&state.pool)
        .await?;

    Ok(count)
}
