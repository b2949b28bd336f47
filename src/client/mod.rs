//! HTTP client for the cointrack backend; transport only, no local state.

pub mod view;

use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::assets::dto::AssetPayload;
use crate::assets::Asset;
use crate::auth::API_KEY_HEADER;
use crate::users::dto::UserPayload;
use crate::users::User;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ApiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> anyhow::Result<Self> {
        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    pub async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        self.fetch("/users").await
    }

    pub async fn create_user(&self, payload: &UserPayload) -> anyhow::Result<User> {
        self.mutate(Method::POST, "/users", payload).await
    }

    pub async fn update_user(&self, id: i64, payload: &UserPayload) -> anyhow::Result<User> {
        self.mutate(Method::PUT, &format!("/users/{id}"), payload)
            .await
    }

    pub async fn delete_user(&self, id: i64) -> anyhow::Result<()> {
        self.remove(&format!("/users/{id}")).await
    }

    pub async fn list_assets(&self) -> anyhow::Result<Vec<Asset>> {
        self.fetch("/assets").await
    }

    pub async fn create_asset(&self, payload: &AssetPayload) -> anyhow::Result<Asset> {
        self.mutate(Method::POST, "/assets", payload).await
    }

    pub async fn update_asset(&self, id: i64, payload: &AssetPayload) -> anyhow::Result<Asset> {
        self.mutate(Method::PUT, &format!("/assets/{id}"), payload)
            .await
    }

    pub async fn delete_asset(&self, id: i64) -> anyhow::Result<()> {
        self.remove(&format!("/assets/{id}")).await
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let res = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .with_context(|| format!("GET {path}"))?;
        decode(res).await
    }

    async fn mutate<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> anyhow::Result<T> {
        let mut req = self
            .http
            .request(method.clone(), format!("{}{}", self.base_url, path))
            .json(body);
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }
        let res = req
            .send()
            .await
            .with_context(|| format!("{method} {path}"))?;
        decode(res).await
    }

    async fn remove(&self, path: &str) -> anyhow::Result<()> {
        let mut req = self.http.delete(format!("{}{}", self.base_url, path));
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }
        let res = req.send().await.with_context(|| format!("DELETE {path}"))?;
        check(res).await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> anyhow::Result<T> {
    let res = check(res).await?;
    let value = res.json::<T>().await.context("decode response body")?;
    Ok(value)
}

/// Turns a non-success response into an error carrying the server's detail.
async fn check(res: Response) -> anyhow::Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    bail!("server returned {status}: {}", error_detail(&body));
}

/// Pulls the `error` field out of an error body, falling back to the raw text.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_detail_reads_error_field() {
        assert_eq!(
            error_detail(r#"{"error":"user name 'alice' already exists"}"#),
            "user name 'alice' already exists"
        );
    }

    #[test]
    fn error_detail_falls_back_to_raw_body() {
        assert_eq!(error_detail("bad gateway"), "bad gateway");
        assert_eq!(error_detail(r#"{"detail":"other"}"#), r#"{"detail":"other"}"#);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8080/", None).expect("client");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
