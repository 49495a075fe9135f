use log::{debug, error};
use tokio::task::JoinHandle;

use crate::{
    api::{ApiError, AuthService},
    model::{AuthResponse, RegisterProfile},
};

use super::GENERIC_ERROR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

pub type AuthForm = RegisterProfile;

/// Login and registration form.
#[derive(Debug, Default)]
pub struct AuthView {
    pub mode: AuthMode,
    pub form: AuthForm,
    loading: bool,
    error: Option<String>,
    pending_login: Option<JoinHandle<Result<AuthResponse, ApiError>>>,
}

impl AuthView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Switch between login and registration, dropping whatever was typed.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.error = None;
        self.form = AuthForm::default();
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Login",
            AuthMode::Register => "Register",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            "Loading..."
        } else {
            self.title()
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Need an account? Register",
            AuthMode::Register => "Already have an account? Login",
        }
    }

    /// Send the form. Returns whether the request succeeded.
    ///
    /// Does nothing while a previous submission is still outstanding.
    pub async fn submit(&mut self, auth: &AuthService) -> bool {
        if self.loading {
            debug!("Ignoring submit while a request is outstanding");
            return false;
        }
        self.loading = true;
        self.error = None;

        let result = match self.mode {
            AuthMode::Login => auth
                .login(&self.form.username, &self.form.password)
                .await
                .map(drop),
            AuthMode::Register => auth.register(&self.form).await.map(|registration| {
                self.pending_login = Some(registration.login);
            }),
        };
        self.loading = false;

        match result {
            Ok(()) => true,
            Err(e) => {
                debug!("{} failed: {}", self.title(), e);
                self.error = Some(e.message_or(GENERIC_ERROR).to_string());
                false
            }
        }
    }

    /// Wait for the login a successful registration started, showing its error
    /// if it fails. Returns `true` straight away when nothing is pending.
    pub async fn finish_login(&mut self) -> bool {
        let Some(login) = self.pending_login.take() else {
            return true;
        };
        self.loading = true;
        let result = login.await;
        self.loading = false;

        match result {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                self.error = Some(e.message_or(GENERIC_ERROR).to_string());
                false
            }
            Err(e) => {
                error!("Login after registering did not finish: {}", e);
                self.error = Some(GENERIC_ERROR.to_string());
                false
            }
        }
    }
}
