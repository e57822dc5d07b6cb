//! Session lifecycle: populated at login, read by every screen, cleared at logout.

use api::{CourierApi, Credentials};
use serde_json::{Map, Value};
use store::{KeyValueStore, LocalCache, Session};

use crate::error::{AppError, FieldError};
use crate::registration::validate_phone;

#[derive(Clone, Debug)]
pub struct SessionStore<S: KeyValueStore> {
    cache: LocalCache<S>,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(cache: LocalCache<S>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &LocalCache<S> {
        &self.cache
    }

    pub async fn current(&self) -> Option<Session> {
        self.cache.session().await
    }

    /// Persist a profile returned by the server.
    ///
    /// The push token is marked unsynced so it gets registered for this user.
    pub async fn login(&self, profile: Map<String, Value>) -> Result<Session, AppError> {
        let session = Session::from_profile(profile).ok_or(AppError::InvalidProfile)?;
        self.cache.set_profile(&session.profile).await;
        self.cache.mark_push_token_unsynced().await;
        tracing::info!(role = %session.role, "logged in");
        Ok(session)
    }

    /// Validate credentials, log in against the API and persist the session.
    pub async fn login_with<A: CourierApi>(
        &self,
        api: &A,
        phone: &str,
        password: &str,
    ) -> Result<Session, AppError> {
        let mut errors = Vec::new();
        let phone = match validate_phone(phone) {
            Ok(phone) => Some(phone),
            Err(e) => {
                errors.push(e);
                None
            }
        };
        if password.is_empty() {
            errors.push(FieldError::new("password", "is required"));
        }
        let phone = match phone {
            Some(phone) if errors.is_empty() => phone,
            _ => return Err(AppError::Validation(errors)),
        };

        let credentials = Credentials {
            phone,
            password: password.to_string(),
        };
        let profile = api.login(&credentials).await?;
        self.login(profile).await
    }

    pub async fn logout(&self) {
        self.cache.clear_session().await;
        tracing::info!("logged out");
    }
}
