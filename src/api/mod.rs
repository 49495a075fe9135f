pub mod auth;
pub mod comments;
pub mod error;
pub mod posts;
pub mod suggestions;

use std::sync::Arc;

use log::{debug, log_enabled, trace};
use reqwest::{cookie::Jar, Client, Method};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::{Semaphore, SemaphorePermit};
use url::Url;

use crate::config::Config;

pub use auth::{AuthService, Registration, Session};
pub use comments::CommentService;
pub use error::ApiError;
pub use posts::PostService;
pub use suggestions::SuggestionService;

/// Cookie-carrying JSON client shared by every service.
///
/// Clones share the connection pool, the cookie jar and the request limit.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: ClientWithMiddleware,
    jar: Arc<Jar>,
    base: Url,
    semaphore: Arc<Semaphore>,
}

impl ApiClient {
    /// Client for the Mini Twitter backend, carrying the configured session.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Self::build(config, config.base_url(), config.session())
    }

    /// Client for another service at `base_url`, sharing the request settings
    /// but not the session.
    pub fn connect(config: &Config, base_url: &str) -> Result<Self, ApiError> {
        Self::build(config, base_url, None)
    }

    fn build(config: &Config, base_url: &str, session: Option<String>) -> Result<Self, ApiError> {
        let base = Url::parse(base_url.trim_end_matches('/'))?;

        let jar = Arc::new(Jar::default());
        if let Some(session) = session {
            debug!("Reusing session cookie for {}", base);
            jar.add_cookie_str(&session, &base);
        }

        let client = Client::builder().cookie_provider(jar.clone()).build()?;
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.retries());
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            jar,
            base,
            semaphore: Arc::new(Semaphore::new(config.limit().max(1))),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Session cookies currently held for the backend origin, `name=value; ...`
    pub fn cookies(&self) -> Option<String> {
        use reqwest::cookie::CookieStore;
        let header = self.jar.cookies(&self.base)?;
        header.to_str().ok().map(str::to_string)
    }

    /// Absolute url of an api `path` such as `/api/posts/1/likes`.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.base.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}", base, path))?)
    }

    async fn permit(&self) -> Option<SemaphorePermit<'_>> {
        // the semaphore is never closed
        self.semaphore.acquire().await.ok()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, None::<&Value>).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        let _permit = self.permit().await;

        debug!("{} {}", method, url);
        let request: RequestBuilder = self.client.request(method.clone(), url.clone());
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if log_enabled!(log::Level::Trace) {
            match serde_json::from_slice::<Value>(&bytes) {
                Ok(value) => trace!(
                    "{} {} -> {}\n{}",
                    method,
                    url,
                    status,
                    serde_json::to_string_pretty(&value).unwrap_or_default()
                ),
                Err(_) => trace!("{} {} -> {} ({} bytes)", method, url, status, bytes.len()),
            }
        }

        if !status.is_success() {
            debug!("{} {} failed with {}", method, url, status);
            return Err(ApiError::from_response(status, &bytes));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}
