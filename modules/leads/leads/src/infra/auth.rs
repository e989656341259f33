use std::collections::HashMap;

use parking_lot::Mutex;
use secrecy::{ExposeSecret, SecretString};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::domain::ports::SessionProvider;

/// Single configured admin account with in-memory sessions.
pub struct StaticSessionProvider {
    username: String,
    password: SecretString,
    ttl: Duration,
    sessions: Mutex<HashMap<String, OffsetDateTime>>,
}

impl StaticSessionProvider {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
            ttl: Duration::seconds(i64::try_from(config.session_ttl_secs).unwrap_or(i64::MAX)),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    fn active_sessions(&self) -> usize {
        let mut sessions = self.sessions.lock();
        prune_expired(&mut sessions, OffsetDateTime::now_utc());
        sessions.len()
    }
}

fn prune_expired(sessions: &mut HashMap<String, OffsetDateTime>, now: OffsetDateTime) {
    sessions.retain(|_, expires| *expires > now);
}

impl SessionProvider for StaticSessionProvider {
    fn login(&self, username: &str, password: &str) -> Option<String> {
        if username != self.username || password != self.password.expose_secret() {
            tracing::warn!(username, "Rejected admin login");
            return None;
        }
        let token = Uuid::new_v4().to_string();
        let now = OffsetDateTime::now_utc();
        let mut sessions = self.sessions.lock();
        prune_expired(&mut sessions, now);
        sessions.insert(token.clone(), now.saturating_add(self.ttl));
        drop(sessions);
        tracing::info!(username, "Admin signed in");
        Some(token)
    }

    fn is_valid(&self, token: &str) -> bool {
        let mut sessions = self.sessions.lock();
        match sessions.get(token) {
            Some(expires) if *expires > OffsetDateTime::now_utc() => true,
            Some(_) => {
                sessions.remove(token);
                false
            }
            None => false,
        }
    }

    fn logout(&self, token: &str) {
        if self.sessions.lock().remove(token).is_some() {
            tracing::info!("Admin signed out");
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn accepts_configured_credentials_only() {
        let provider = StaticSessionProvider::new(&AuthConfig::default());

        assert!(provider.login("admin", "wrong").is_none());
        assert!(provider.login("root", "password123").is_none());

        let token = provider.login("admin", "password123").unwrap();
        assert!(Uuid::parse_str(&token).is_ok());
        assert!(provider.is_valid(&token));
        assert!(!provider.is_valid("not-a-session"));
    }

    #[test]
    fn logout_ends_the_session() {
        let provider = StaticSessionProvider::new(&AuthConfig::default());
        let token = provider.login("admin", "password123").unwrap();

        provider.logout(&token);

        assert!(!provider.is_valid(&token));
        assert_eq!(provider.active_sessions(), 0);
    }

    #[test]
    fn expired_sessions_are_rejected() {
        let config = AuthConfig {
            session_ttl_secs: 0,
            ..AuthConfig::default()
        };
        let provider = StaticSessionProvider::new(&config);
        let token = provider.login("admin", "password123").unwrap();

        assert!(!provider.is_valid(&token));
    }

    #[test]
    fn login_drops_sessions_that_were_never_presented_again() {
        let provider = StaticSessionProvider::new(&AuthConfig::default());
        let abandoned = provider.login("admin", "password123").unwrap();
        provider
            .sessions
            .lock()
            .insert(abandoned.clone(), OffsetDateTime::now_utc() - Duration::seconds(1));

        let fresh = provider.login("admin", "password123").unwrap();

        let sessions = provider.sessions.lock();
        assert!(!sessions.contains_key(&abandoned));
        assert!(sessions.contains_key(&fresh));
        assert_eq!(sessions.len(), 1);
    }
}
