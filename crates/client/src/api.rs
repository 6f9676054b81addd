//! Thin HTTP client for the backend API. Carries the bearer token once the
//! user signs in; a 401 drops it, matching the session-expiry behavior of
//! the SPA.

use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::ClientError;
use crate::store::Session;
use service::sync::SyncSnapshot;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    identifier: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    name: &'a str,
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(rename = "imageUrl")]
    image_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Deserialize)]
struct PullResponse {
    data: SyncSnapshot,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    async fn handle<T: DeserializeOwned>(
        &mut self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.clear_token();
        }
        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| status.to_string());
        Err(ClientError::Api { status: status.as_u16(), message })
    }

    // -- auth -------------------------------------------------------------

    /// Signs in and keeps the token for subsequent calls.
    pub async fn login(&mut self, identifier: &str, password: &str) -> Result<Session, ClientError> {
        let resp = self
            .http
            .post(self.url("auth/login"))
            .json(&LoginBody { identifier, password })
            .send()
            .await?;
        let session: Session = self.handle(resp).await?;
        self.token = Some(session.token.clone());
        Ok(session)
    }

    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.url("auth/register"))
            .json(&RegisterBody { name, email, username, password })
            .send()
            .await?;
        let _: serde_json::Value = self.handle(resp).await?;
        Ok(())
    }

    pub async fn forgot_password(&mut self, email: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.url("auth/forgot-password"))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;
        let _: serde_json::Value = self.handle(resp).await?;
        Ok(())
    }

    pub async fn reset_password(&mut self, token: &str, password: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .put(self.url(&format!("auth/reset-password/{token}")))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await?;
        let _: serde_json::Value = self.handle(resp).await?;
        Ok(())
    }

    // -- resources ---------------------------------------------------------

    /// `GET /api/{resource}`.
    pub async fn list<T: DeserializeOwned>(&mut self, resource: &str) -> Result<Vec<T>, ClientError> {
        let resp = self.authorize(self.http.get(self.url(resource))).send().await?;
        self.handle(resp).await
    }

    /// `POST /api/{resource}`; returns the record the server stored.
    pub async fn create<T, B>(&mut self, resource: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self.authorize(self.http.post(self.url(resource)).json(body)).send().await?;
        self.handle(resp).await
    }

    /// `PUT /api/{resource}/{id}`.
    pub async fn update<T, B>(&mut self, resource: &str, id: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self
            .authorize(self.http.put(self.url(&format!("{resource}/{id}"))).json(body))
            .send()
            .await?;
        self.handle(resp).await
    }

    /// `DELETE /api/{resource}/{id}`.
    pub async fn delete(&mut self, resource: &str, id: &str) -> Result<(), ClientError> {
        let resp = self
            .authorize(self.http.delete(self.url(&format!("{resource}/{id}"))))
            .send()
            .await?;
        let _: serde_json::Value = self.handle(resp).await?;
        Ok(())
    }

    // -- sync and upload -----------------------------------------------------

    pub async fn sync_push(&mut self, snapshot: &SyncSnapshot) -> Result<(), ClientError> {
        let resp =
            self.authorize(self.http.post(self.url("sync/push")).json(snapshot)).send().await?;
        let _: serde_json::Value = self.handle(resp).await?;
        Ok(())
    }

    pub async fn sync_pull(&mut self) -> Result<SyncSnapshot, ClientError> {
        let resp = self.authorize(self.http.get(self.url("sync/pull"))).send().await?;
        let body: PullResponse = self.handle(resp).await?;
        Ok(body.data)
    }

    /// Uploads image bytes and returns the public `/uploads/...` URL.
    pub async fn upload(&mut self, filename: &str, bytes: Vec<u8>) -> Result<String, ClientError> {
        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new().part("image", part);
        let resp =
            self.authorize(self.http.post(self.url("upload")).multipart(form)).send().await?;
        let body: UploadResponse = self.handle(resp).await?;
        Ok(body.image_url)
    }
}
