//! REST backend.
//!
//! Wraps the remote API behind plain request/response data. The actual
//! transfer is abstracted by [`SendRequest`] so that everything above the
//! browser fetch call can be exercised in tests.

use gloo_net::http::Request;
use liftlog_domain as domain;
use serde::Deserialize;
use serde_json::json;

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Error message from the API's `detail` field, falling back to the
    /// HTTP status line if the body carries none.
    fn detail(&self) -> String {
        #[derive(Deserialize)]
        struct ErrorBody {
            detail: String,
        }

        serde_json::from_str::<ErrorBody>(&self.body).map_or_else(
            |_| format!("{} {}", self.status, self.status_text),
            |body| body.detail,
        )
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no connection")]
pub struct SendError;

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: HttpRequest) -> Result<HttpResponse, SendError>;
}

pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: HttpRequest) -> Result<HttpResponse, SendError> {
        let builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        let builder = request
            .headers
            .iter()
            .fold(builder, |builder, (name, value)| builder.header(name, value));
        let request = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|_| SendError)?;
        let response = request.send().await.map_err(|_| SendError)?;
        Ok(HttpResponse {
            status: response.status(),
            status_text: response.status_text(),
            body: response.text().await.unwrap_or_default(),
        })
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct Rest<S: SendRequest> {
    sender: S,
}

impl Rest<GlooNetSendRequest> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sender: GlooNetSendRequest,
        }
    }
}

impl Default for Rest<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SendRequest> Rest<S> {
    pub const fn with_sender(sender: S) -> Self {
        Self { sender }
    }

    /// Exchanges credentials for a bearer token. The login endpoint is the
    /// only form-encoded one and expects the email in the `username` field.
    pub async fn request_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<domain::Session, domain::ReadError> {
        let body = serde_urlencoded::to_string([("username", email), ("password", password)])
            .map_err(|err| domain::ReadError::Other(Box::new(err)))?;
        let response: TokenResponse = self
            .fetch(HttpRequest {
                method: Method::Post,
                url: "/login".to_string(),
                headers: vec![(CONTENT_TYPE, FORM_URLENCODED.to_string())],
                body: Some(body),
            })
            .await?;
        Ok(domain::Session {
            token: response.access_token.into(),
            email: email.to_string(),
        })
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<(), domain::CreateError> {
        self.fetch_no_content(HttpRequest {
            method: Method::Post,
            url: "/signup".to_string(),
            headers: vec![(CONTENT_TYPE, APPLICATION_JSON.to_string())],
            body: Some(json!({ "email": email, "password": password }).to_string()),
        })
        .await?;
        Ok(())
    }

    pub async fn read_workouts(
        &self,
        page: domain::Page,
        token: &domain::AccessToken,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        Ok(self
            .fetch(get(format!("/workouts/?{page}"), token))
            .await?)
    }

    pub async fn read_public_workouts(
        &self,
        page: domain::Page,
        token: &domain::AccessToken,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        Ok(self
            .fetch(get(format!("/workouts/public?{page}"), token))
            .await?)
    }

    pub async fn read_workout(
        &self,
        id: domain::WorkoutID,
        token: &domain::AccessToken,
    ) -> Result<domain::Workout, domain::ReadError> {
        Ok(self.fetch(get(format!("/workouts/{id}"), token)).await?)
    }

    pub async fn create_workout(
        &self,
        draft: domain::WorkoutDraft,
        token: &domain::AccessToken,
    ) -> Result<domain::Workout, domain::CreateError> {
        let body = serde_json::to_string(&draft)
            .map_err(|err| domain::CreateError::Other(Box::new(err)))?;
        Ok(self
            .fetch(HttpRequest {
                method: Method::Post,
                url: "/workouts/".to_string(),
                headers: vec![
                    (CONTENT_TYPE, APPLICATION_JSON.to_string()),
                    authorization(token),
                ],
                body: Some(body),
            })
            .await?)
    }

    async fn fetch<T: for<'de> Deserialize<'de>>(
        &self,
        request: HttpRequest,
    ) -> Result<T, domain::StorageError> {
        let response = self.send(request).await?;
        serde_json::from_str(&response.body)
            .map_err(|err| domain::StorageError::Other(Box::new(err)))
    }

    async fn fetch_no_content(&self, request: HttpRequest) -> Result<(), domain::StorageError> {
        self.send(request).await?;
        Ok(())
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, domain::StorageError> {
        let response = self
            .sender
            .send_request(request)
            .await
            .map_err(|_| domain::StorageError::NoConnection)?;
        if response.status == 401 {
            return Err(domain::StorageError::NoSession);
        }
        if !response.ok() {
            return Err(domain::StorageError::Rejected(response.detail()));
        }
        Ok(response)
    }
}

fn get(url: String, token: &domain::AccessToken) -> HttpRequest {
    HttpRequest {
        method: Method::Get,
        url,
        headers: vec![authorization(token)],
        body: None,
    }
}

fn authorization(token: &domain::AccessToken) -> (&'static str, String) {
    ("Authorization", token.authorization_header())
}
