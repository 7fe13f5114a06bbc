#![allow(dead_code)]

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use mealmate::{
    AppState,
    config::{Config, DatabaseConfig, JwtConfig, ObservabilityConfig, ServerConfig},
};
use mealmate_notification::{EmailConfig, Mailer};
use mealmate_user::RegisterInput;
use serde_json::Value;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use temp_dir::TempDir;
use tower::ServiceExt;

#[derive(Default)]
pub struct FakeMailer {
    pub sent: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl Mailer for FakeMailer {
    async fn send(
        &self,
        to: &str,
        _subject: &str,
        _html: String,
        _plain: String,
    ) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(to.to_owned());

        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub pool: SqlitePool,
    pub mailer: Arc<FakeMailer>,
    _dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub cookies: Vec<String>,
    pub body: Value,
}

impl TestResponse {
    /// `name=value` pair of a cookie set by the response.
    pub fn cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");

        self.cookies
            .iter()
            .filter_map(|cookie| cookie.split(';').next())
            .find(|pair| pair.starts_with(&prefix) && pair.len() > prefix.len())
            .map(|pair| pair.to_owned())
    }
}

fn config(url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 0,
        },
        database: DatabaseConfig {
            url,
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            issuer: "mealmate".to_owned(),
            audience: "mealmate-web".to_owned(),
            expiration_days: 1,
        },
        email: EmailConfig {
            smtp_host: "localhost".to_owned(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: "noreply@mealmate.localhost".to_owned(),
        },
        observability: ObservabilityConfig::default(),
    }
}

pub async fn setup_test_app() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}", dir.child("db.sqlite3").to_str().unwrap());
    let opts = SqliteConnectOptions::from_str(&url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    mealmate_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;
    drop(conn);

    let mailer = Arc::new(FakeMailer::default());
    let state = AppState::new(
        config(url),
        mealmate_shared::State {
            read_db: pool.clone(),
            write_db: pool.clone(),
        },
        mailer.clone(),
    );

    Ok(TestApp {
        router: mealmate::router(state.clone()),
        state,
        pool,
        mailer,
        _dir: dir,
    })
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<TestResponse> {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => request.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(|value| value.to_owned())
            .collect();

        let bytes = response.into_body().collect().await?.to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok(TestResponse {
            status,
            cookies,
            body,
        })
    }

    /// Registers a user and returns its auth cookie.
    pub async fn login_as(&self, name: &str) -> anyhow::Result<String> {
        self.state
            .user_command
            .register(RegisterInput {
                username: name.to_owned(),
                email: format!("{name}@mealmate.localhost"),
                password: "my_password".to_owned(),
            })
            .await?;

        let response = self
            .send(
                Method::POST,
                "/login",
                None,
                Some(serde_json::json!({"login": name, "password": "my_password"})),
            )
            .await?;

        response
            .cookie("auth_token")
            .ok_or_else(|| anyhow::anyhow!("login did not set auth cookie"))
    }

    pub async fn otp_code(&self, otp_id: i64) -> anyhow::Result<String> {
        let (code,) = sqlx::query_as::<_, (String,)>("SELECT code FROM email_otp WHERE id = ?")
            .bind(otp_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(code)
    }
}
