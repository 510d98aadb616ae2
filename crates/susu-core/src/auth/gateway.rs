//! Authenticated request gateway.
//!
//! Wraps outbound HTTP calls, attaches the bearer credential, and on a 401
//! performs a single coordinated token refresh shared by every concurrent
//! caller. At most one refresh call is outstanding at any time; requests
//! that fail authentication while it runs park on a completion handle and
//! observe that refresh's single outcome. Irrecoverable failures clear the
//! credential slot and emit one session-end event.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::api::endpoints;
use crate::api::error::{ApiError, ApiResult};
use crate::auth::session::{SessionEndHook, SessionEndReason};
use crate::auth::store::{CredentialPair, TokenStore, mask_token};

const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(30);

/// A rebuildable outbound request.
///
/// The gateway may dispatch the same request twice (once before and once
/// after a refresh), so the description must be cloneable rather than a
/// consumed `reqwest` builder.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: RequestBody,
}

#[derive(Debug, Clone)]
enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartSpec),
}

/// Multipart form description that can be rebuilt per dispatch.
#[derive(Debug, Clone)]
pub struct MultipartSpec {
    texts: Vec<(String, String)>,
    file_name: String,
    file_filename: String,
    file_mime: String,
    file_bytes: Vec<u8>,
}

impl MultipartSpec {
    /// Creates a multipart spec with a single file part.
    pub fn with_file(
        name: impl Into<String>,
        filename: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            texts: Vec::new(),
            file_name: name.into(),
            file_filename: filename.into(),
            file_mime: mime.into(),
            file_bytes: bytes,
        }
    }

    /// Adds a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.texts.push((name.into(), value.into()));
        self
    }

    fn to_form(&self) -> ApiResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in &self.texts {
            form = form.text(name.clone(), value.clone());
        }
        let part = reqwest::multipart::Part::bytes(self.file_bytes.clone())
            .file_name(self.file_filename.clone())
            .mime_str(&self.file_mime)
            .map_err(|err| ApiError::parse(format!("invalid MIME type: {err}")))?;
        Ok(form.part(self.file_name.clone(), part))
    }
}

impl ApiRequest {
    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a POST request with no body.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a POST request with a JSON body.
    ///
    /// # Errors
    /// Returns an error if the body cannot be serialized.
    pub fn post_json(path: impl Into<String>, body: &impl serde::Serialize) -> ApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|err| ApiError::parse(format!("failed to serialize request body: {err}")))?;
        let mut req = Self::new(Method::POST, path);
        req.body = RequestBody::Json(value);
        Ok(req)
    }

    /// Creates a PATCH request with a JSON body.
    ///
    /// # Errors
    /// Returns an error if the body cannot be serialized.
    pub fn patch_json(path: impl Into<String>, body: &impl serde::Serialize) -> ApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|err| ApiError::parse(format!("failed to serialize request body: {err}")))?;
        let mut req = Self::new(Method::PATCH, path);
        req.body = RequestBody::Json(value);
        Ok(req)
    }

    /// Creates a POST request with a multipart body.
    pub fn post_multipart(path: impl Into<String>, spec: MultipartSpec) -> Self {
        let mut req = Self::new(Method::POST, path);
        req.body = RequestBody::Multipart(spec);
        req
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Returns the request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }
}

/// Guarded refresh coordination state.
///
/// `in_flight` serializes refresh initiation; `waiters` holds the completion
/// handle of every request parked behind the current refresh. Both are
/// drained together on settlement so no waiter is ever dropped silently.
#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<ApiResult<String>>>,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    refresh_token: String,
}

/// Authenticated request gateway over one SusuPay deployment.
pub struct AuthGateway {
    http: reqwest::Client,
    base_url: String,
    store: Arc<TokenStore>,
    state: Mutex<RefreshState>,
    refresh_timeout: Duration,
    session_end_hook: Option<SessionEndHook>,
}

impl AuthGateway {
    /// Creates a gateway for the given deployment and credential store.
    pub fn new(base_url: impl Into<String>, store: Arc<TokenStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            store,
            state: Mutex::new(RefreshState::default()),
            refresh_timeout: DEFAULT_REFRESH_TIMEOUT,
            session_end_hook: None,
        }
    }

    /// Overrides the refresh timeout.
    #[must_use]
    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    /// Registers the hook invoked once per irrecoverable auth failure.
    #[must_use]
    pub fn with_session_end_hook(
        mut self,
        hook: impl Fn(SessionEndReason) + Send + Sync + 'static,
    ) -> Self {
        self.session_end_hook = Some(Arc::new(hook));
        self
    }

    /// Returns the credential store backing this gateway.
    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }

    /// Returns the deployment base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns true while a token refresh is outstanding.
    pub fn refresh_in_flight(&self) -> bool {
        self.lock_state().in_flight
    }

    /// Sends a request with the current bearer credential attached.
    ///
    /// Anonymous requests (no stored token) go out without the header. On a
    /// 401 the gateway refreshes the credential pair once, shared across all
    /// concurrent callers, then retries the request exactly once with the
    /// new access token. Any other status, and a 401 after the retry, is
    /// returned unchanged.
    ///
    /// # Errors
    /// Returns an error on transport failure, or a `Refresh`-kind error when
    /// the credential pair could not be renewed (the session has then been
    /// invalidated and the caller must re-authenticate).
    pub async fn send(&self, request: &ApiRequest) -> ApiResult<reqwest::Response> {
        let token = self.store.access_token();
        let response = self.dispatch(request, token.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        // A 401 from the refresh endpoint itself must never start another
        // refresh. The typed client never routes it through here, but the
        // guard keeps the no-loop guarantee independent of callers.
        if request.path == endpoints::AUTH_REFRESH {
            self.clear_credentials();
            self.end_session(SessionEndReason::RefreshFailed);
            return Ok(response);
        }

        let new_token = self.refresh_access_token().await?;

        // Exactly one retry per original request, even if it fails again.
        self.dispatch(request, Some(&new_token)).await
    }

    /// Obtains a fresh access token, joining an in-flight refresh if one
    /// exists or leading a new one otherwise.
    async fn refresh_access_token(&self) -> ApiResult<String> {
        let waiter = {
            let mut state = self.lock_state();
            if state.in_flight {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Some(rx)
            } else {
                state.in_flight = true;
                None
            }
        };

        if let Some(rx) = waiter {
            debug!("401 while refresh in flight; parking request");
            return match rx.await {
                Ok(outcome) => outcome,
                // The sender is only dropped if the leader panicked.
                Err(_) => Err(ApiError::refresh("token refresh was abandoned")),
            };
        }

        let Some(refresh_token) = self.store.refresh_token() else {
            let err = ApiError::refresh("no refresh token stored");
            self.settle_refresh(&Err(err.clone()));
            self.clear_credentials();
            self.end_session(SessionEndReason::MissingRefreshToken);
            return Err(err);
        };

        debug!(refresh_token = %mask_token(&refresh_token), "starting token refresh");
        match self.run_refresh(&refresh_token).await {
            Ok(pair) => {
                let access = pair.access_token.clone();
                if let Err(err) = self.store.set(pair) {
                    // The new pair is live in memory; losing the file copy
                    // only costs a re-login after restart.
                    warn!("failed to persist refreshed credentials: {err:#}");
                }
                debug!("token refresh succeeded");
                self.settle_refresh(&Ok(access.clone()));
                Ok(access)
            }
            Err(err) => {
                warn!("token refresh failed: {err}");
                self.settle_refresh(&Err(err.clone()));
                self.clear_credentials();
                self.end_session(SessionEndReason::RefreshFailed);
                Err(err)
            }
        }
    }

    /// Calls the refresh endpoint directly, bypassing `send`, bounded by the
    /// refresh timeout. Every failure mode maps to a `Refresh`-kind error.
    async fn run_refresh(&self, refresh_token: &str) -> ApiResult<CredentialPair> {
        let url = format!("{}{}", self.base_url, endpoints::AUTH_REFRESH);
        let call = async {
            let response = self
                .http
                .post(&url)
                .json(&serde_json::json!({ "refresh_token": refresh_token }))
                .send()
                .await
                .map_err(|err| ApiError::refresh(format!("token refresh failed: {err}")))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let mut err = ApiError::http_status(status.as_u16(), &body);
                err.kind = crate::api::error::ApiErrorKind::Refresh;
                err.message = format!("token refresh failed: {}", err.message);
                return Err(err);
            }

            let tokens: RefreshResponse = response
                .json()
                .await
                .map_err(|err| ApiError::refresh(format!("invalid refresh response: {err}")))?;
            Ok(CredentialPair {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
            })
        };

        match tokio::time::timeout(self.refresh_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::refresh(format!(
                "token refresh timed out after {}s",
                self.refresh_timeout.as_secs()
            ))),
        }
    }

    /// Clears the in-flight flag and fans the outcome out to every waiter.
    ///
    /// Runs exactly once per refresh, on success and failure alike; the
    /// waiter list is drained completely so no request is dropped.
    fn settle_refresh(&self, outcome: &ApiResult<String>) {
        let waiters = {
            let mut state = self.lock_state();
            state.in_flight = false;
            std::mem::take(&mut state.waiters)
        };
        for waiter in waiters {
            // A waiter that gave up is not an error here.
            let _ = waiter.send(outcome.clone());
        }
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> ApiResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        match &request.body {
            RequestBody::Empty => {}
            RequestBody::Json(value) => builder = builder.json(value),
            RequestBody::Multipart(spec) => builder = builder.multipart(spec.to_form()?),
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder
            .send()
            .await
            .map_err(|err| ApiError::transport(&err))
    }

    fn clear_credentials(&self) {
        if let Err(err) = self.store.clear() {
            warn!("failed to clear credentials: {err:#}");
        }
    }

    fn end_session(&self, reason: SessionEndReason) {
        debug!(%reason, "session invalidated");
        if let Some(hook) = &self.session_end_hook {
            hook(reason);
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, RefreshState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
