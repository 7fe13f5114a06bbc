use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use mealmate_user::PendingSignup;
use tokio::sync::Mutex;

pub const SIGNUP_COOKIE_NAME: &str = "signup_session";
pub const SIGNUP_TTL: Duration = Duration::from_secs(30 * 60);

struct Entry {
    pending: PendingSignup,
    created_at: Instant,
}

/// In-process store of signups waiting for their email to be confirmed,
/// keyed by the `signup_session` cookie.
#[derive(Clone)]
pub struct SignupSessions {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    ttl: Duration,
}

impl Default for SignupSessions {
    fn default() -> Self {
        Self::new(SIGNUP_TTL)
    }
}

impl SignupSessions {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Stores the pending signup and returns its session key.
    pub async fn insert(&self, pending: PendingSignup) -> String {
        let key = ulid::Ulid::new().to_string();
        let mut entries = self.entries.lock().await;

        entries.retain(|_, entry| entry.created_at.elapsed() < self.ttl);
        entries.insert(
            key.to_owned(),
            Entry {
                pending,
                created_at: Instant::now(),
            },
        );

        key
    }

    /// Pending signup of a live session.
    pub async fn get(&self, key: &str) -> Option<PendingSignup> {
        let entries = self.entries.lock().await;

        entries
            .get(key)
            .filter(|entry| entry.created_at.elapsed() < self.ttl)
            .map(|entry| entry.pending.clone())
    }

    pub async fn remove(&self, key: &str) {
        self.entries.lock().await.remove(key);
    }
}
