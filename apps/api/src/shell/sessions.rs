//! One shell per browser, keyed by a client cookie.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{header, HeaderMap};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::form::FormThresholds;
use crate::shell::{Shell, SharedShell};

pub const CLIENT_COOKIE: &str = "profai_client";

/// Shells untouched for this long are dropped when a new client arrives.
const IDLE_TTL: Duration = Duration::from_secs(60 * 60);

struct Entry {
    shell: SharedShell,
    touched_at: Instant,
}

/// Maps client ids to their shells. The map lock is only held to look up or
/// insert; each shell has its own lock.
pub struct ShellRegistry {
    thresholds: FormThresholds,
    entries: Mutex<HashMap<Uuid, Entry>>,
}

/// The caller's shell plus the id to echo back in `Set-Cookie`.
pub struct ClientShell {
    pub client_id: Uuid,
    pub shell: SharedShell,
}

impl ClientShell {
    pub fn set_cookie(&self) -> [(header::HeaderName, String); 1] {
        [(
            header::SET_COOKIE,
            format!(
                "{CLIENT_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
                self.client_id
            ),
        )]
    }
}

impl ShellRegistry {
    pub fn new(thresholds: FormThresholds) -> Self {
        Self {
            thresholds,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the shell for the cookie's client id, or a fresh shell under a
    /// new id when the cookie is missing, malformed, or unknown.
    pub async fn resolve(&self, headers: &HeaderMap) -> ClientShell {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();

        if let Some(client_id) = client_id_from(headers) {
            if let Some(entry) = entries.get_mut(&client_id) {
                entry.touched_at = now;
                return ClientShell {
                    client_id,
                    shell: entry.shell.clone(),
                };
            }
        }

        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.touched_at) < IDLE_TTL);
        if entries.len() < before {
            debug!("Evicted {} idle shell(s)", before - entries.len());
        }

        let client_id = Uuid::new_v4();
        let shell: SharedShell = Arc::new(Mutex::new(Shell::new(self.thresholds)));
        entries.insert(
            client_id,
            Entry {
                shell: shell.clone(),
                touched_at: now,
            },
        );
        debug!("New client {client_id} ({} active)", entries.len());

        ClientShell { client_id, shell }
    }

    /// Looks up a client's shell without creating one.
    #[cfg(test)]
    pub async fn get(&self, client_id: Uuid) -> Option<SharedShell> {
        self.entries
            .lock()
            .await
            .get(&client_id)
            .map(|entry| entry.shell.clone())
    }
}

/// Reads the client id from the `Cookie` header(s).
pub fn client_id_from(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == CLIENT_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn cookie_headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_client_id_from_cookie_list() {
        let id = Uuid::new_v4();
        let headers = cookie_headers(&format!("theme=dark; {CLIENT_COOKIE}={id}; other=1"));
        assert_eq!(client_id_from(&headers), Some(id));
    }

    #[test]
    fn test_client_id_missing_or_malformed() {
        assert_eq!(client_id_from(&HeaderMap::new()), None);
        assert_eq!(
            client_id_from(&cookie_headers(&format!("{CLIENT_COOKIE}=not-a-uuid"))),
            None
        );
    }

    #[tokio::test]
    async fn test_known_client_gets_same_shell() {
        let registry = ShellRegistry::new(FormThresholds::default());
        let first = registry.resolve(&HeaderMap::new()).await;
        first.shell.lock().await.draft.essay_text = "mine".to_string();

        let headers = cookie_headers(&format!("{CLIENT_COOKIE}={}", first.client_id));
        let again = registry.resolve(&headers).await;
        assert_eq!(again.client_id, first.client_id);
        assert_eq!(again.shell.lock().await.draft.essay_text, "mine");
    }

    #[tokio::test]
    async fn test_clients_do_not_share_shells() {
        let registry = ShellRegistry::new(FormThresholds::default());
        let a = registry.resolve(&HeaderMap::new()).await;
        a.shell.lock().await.draft.essay_text = "confidential".to_string();

        let b = registry.resolve(&HeaderMap::new()).await;
        assert_ne!(a.client_id, b.client_id);
        assert!(b.shell.lock().await.draft.essay_text.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_client_id_is_not_adopted() {
        let registry = ShellRegistry::new(FormThresholds::default());
        let forged = Uuid::new_v4();
        let headers = cookie_headers(&format!("{CLIENT_COOKIE}={forged}"));
        let resolved = registry.resolve(&headers).await;
        assert_ne!(resolved.client_id, forged);
        assert!(registry.get(forged).await.is_none());
    }

    #[test]
    fn test_set_cookie_value() {
        let client = ClientShell {
            client_id: Uuid::nil(),
            shell: Arc::new(Mutex::new(Shell::new(FormThresholds::default()))),
        };
        let [(name, value)] = client.set_cookie();
        assert_eq!(name, header::SET_COOKIE);
        assert_eq!(
            value,
            format!("{CLIENT_COOKIE}=00000000-0000-0000-0000-000000000000; Path=/; HttpOnly; SameSite=Lax")
        );
    }
}
