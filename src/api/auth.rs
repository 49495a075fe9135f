use std::sync::Arc;

use log::{debug, info, warn};
use serde_json::json;
use tokio::{sync::watch, task::JoinHandle};

use crate::model::{AuthResponse, Credentials, MessageResponse, RegisterProfile};

use super::{ApiClient, ApiError};

/// The logged in username, shared by everything holding a clone.
#[derive(Debug, Clone)]
pub struct Session {
    user: Arc<watch::Sender<Option<String>>>,
}

impl Default for Session {
    fn default() -> Self {
        let (user, _) = watch::channel(None);
        Self {
            user: Arc::new(user),
        }
    }
}

impl Session {
    pub fn current(&self) -> Option<String> {
        self.user.borrow().clone()
    }
    pub fn is_logged_in(&self) -> bool {
        self.user.borrow().is_some()
    }
    /// Receiver notified on every write to the session.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.user.subscribe()
    }
    fn set(&self, user: Option<String>) {
        self.user.send_replace(user);
    }
}

/// A created account and the login started for it.
#[derive(Debug)]
pub struct Registration {
    pub response: AuthResponse,
    pub login: JoinHandle<Result<AuthResponse, ApiError>>,
}

#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
    session: Session,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
    pub fn current_user(&self) -> Option<String> {
        self.session.current()
    }
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.session.subscribe()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let credentials = Credentials { username, password };
        let response: AuthResponse = self.client.post("/api/auth/login", &credentials).await?;
        info!("Logged in as {}", response.user);
        self.session.set(Some(response.user.clone()));
        Ok(response)
    }

    /// Create the account, then log in with it in the background.
    ///
    /// Returns as soon as the account exists. The login keeps running if the
    /// returned handle is dropped; a failure is logged either way.
    pub async fn register(&self, profile: &RegisterProfile) -> Result<Registration, ApiError> {
        let response: AuthResponse = self.client.post("/api/auth/register", profile).await?;
        info!("Registered {}", response.user);

        let auth = self.clone();
        let (username, password) = (profile.username.clone(), profile.password.clone());
        let login = tokio::spawn(async move {
            let result = auth.login(&username, &password).await;
            if let Err(e) = &result {
                warn!("Login after registering {} failed: {}", username, e);
            }
            result
        });

        Ok(Registration { response, login })
    }

    /// Ends the session on the server and, only if that succeeded, locally.
    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        let response: MessageResponse = self.client.post("/api/auth/logout", &json!({})).await?;
        info!("Logged out");
        self.session.set(None);
        Ok(response)
    }

    /// Resolve a still valid server side session in the background.
    ///
    /// Any failure, network errors included, leaves the session empty.
    pub fn check_auth_status(&self) -> JoinHandle<()> {
        let auth = self.clone();
        tokio::spawn(async move {
            match auth.client.get::<AuthResponse>("/api/auth/current").await {
                Ok(response) => {
                    debug!("Session belongs to {}", response.user);
                    auth.session.set(Some(response.user));
                }
                Err(e) => {
                    debug!("No active session: {}", e);
                    auth.session.set(None);
                }
            }
        })
    }
}
