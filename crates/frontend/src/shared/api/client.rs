//! Thin HTTP client over `gloo-net`.
//!
//! Centralizes what every request needs: base URL resolution, the bearer
//! token, the `Accept` header, a hard timeout, and normalization of failures
//! into [`ApiError`]. Callers deserialize straight into contract types.

use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Serialize;

use contracts::api::ApiErrorBody;

use super::error::ApiError;
use crate::system::auth::storage;

/// Requests that have not completed by this deadline are aborted and
/// surfaced as a network error.
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

/// API origin derived from the current window location. The backend serves
/// on port 8000 next to wherever the frontend is hosted.
pub fn api_base() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location.hostname().unwrap_or_else(|_| "localhost".to_string());
    format!("{protocol}//{hostname}:8000/api")
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Aborts the request when dropped after the deadline; dropping earlier
/// (response arrived) cancels the timer instead.
struct TimeoutGuard {
    _timer: Timeout,
}

fn timeout_signal() -> Result<(web_sys::AbortSignal, TimeoutGuard), ApiError> {
    let controller = web_sys::AbortController::new()
        .map_err(|_| ApiError::request_setup("failed to create abort controller"))?;
    let signal = controller.signal();
    let timer = Timeout::new(REQUEST_TIMEOUT_MS, move || controller.abort());
    Ok((signal, TimeoutGuard { _timer: timer }))
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: api_base(),
        }
    }

    pub fn with_base(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn decorate(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match storage::get_token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, ApiError> {
        let (signal, guard) = timeout_signal()?;
        let builder = Request::get(&self.url(path))
            .query(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .abort_signal(Some(&signal));
        let response = self
            .decorate(builder)
            .send()
            .await
            .map_err(send_error)?;
        drop(guard);
        decode(response).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let (signal, guard) = timeout_signal()?;
        let request = self
            .decorate(Request::post(&self.url(path)).abort_signal(Some(&signal)))
            .json(body)
            .map_err(|err| ApiError::request_setup(err.to_string()))?;
        let response = request.send().await.map_err(send_error)?;
        drop(guard);
        decode(response).await
    }

    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let (signal, guard) = timeout_signal()?;
        let request = self
            .decorate(Request::put(&self.url(path)).abort_signal(Some(&signal)))
            .json(body)
            .map_err(|err| ApiError::request_setup(err.to_string()))?;
        let response = request.send().await.map_err(send_error)?;
        drop(guard);
        decode(response).await
    }

    pub async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let (signal, guard) = timeout_signal()?;
        let request = self
            .decorate(Request::patch(&self.url(path)).abort_signal(Some(&signal)))
            .json(body)
            .map_err(|err| ApiError::request_setup(err.to_string()))?;
        let response = request.send().await.map_err(send_error)?;
        drop(guard);
        decode(response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let (signal, guard) = timeout_signal()?;
        let response = self
            .decorate(Request::delete(&self.url(path)).abort_signal(Some(&signal)))
            .send()
            .await
            .map_err(send_error)?;
        drop(guard);
        decode(response).await
    }

    /// POST of a prebuilt multipart body. The browser sets the content type
    /// and boundary itself, so no explicit header here.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: web_sys::FormData,
    ) -> Result<T, ApiError> {
        let (signal, guard) = timeout_signal()?;
        let request = self
            .decorate(Request::post(&self.url(path)).abort_signal(Some(&signal)))
            .body(form)
            .map_err(|err| ApiError::request_setup(err.to_string()))?;
        let response = request.send().await.map_err(send_error)?;
        drop(guard);
        decode(response).await
    }
}

/// A send-level failure means the request never produced a response:
/// connectivity loss or the timeout abort. Serialization problems before
/// dispatch are the caller's bug, not the network's.
fn send_error(err: gloo_net::Error) -> ApiError {
    match err {
        gloo_net::Error::JsError(_) => ApiError::network(),
        other => ApiError::request_setup(other.to_string()),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::request_setup(err.to_string()))
    } else {
        let body = response.json::<ApiErrorBody>().await.unwrap_or_default();
        Err(ApiError::from_response(status, body))
    }
}
