//! HTTP response handling with Marketing Cloud error surfacing.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Error, ErrorKind, Result};

/// Wrapper around an HTTP response.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

/// Marketing Cloud REST error payload.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    errorcode: u64,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.inner.json().await.map_err(Into::into)
    }

    /// Turn a non-2xx response into a typed error.
    ///
    /// Marketing Cloud error bodies (`message` + `errorcode`) become
    /// `ErrorKind::Api`; anything else becomes `ErrorKind::Http` carrying a
    /// snippet of the body.
    pub async fn check_api_error(self) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let body = self.inner.text().await.unwrap_or_default();

        if let Ok(api) = serde_json::from_str::<ApiErrorBody>(&body) {
            return Err(Error::new(ErrorKind::Api {
                status,
                error_code: api.errorcode,
                message: api.message,
            }));
        }

        let mut message = body;
        message.truncate(256);
        Err(Error::new(ErrorKind::Http { status, message }))
    }
}
