//! HTTP client implementation for Garmin Connect.
//!
//! This module provides a reqwest-based implementation of the [`GarminClient`](crate::GarminClient) trait.

use crate::session::{extract_ticket_url, login_form, signin_params};
use crate::{Credentials, DateRange, GarminClient, GarminConfig, GarminError};
use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{ORIGIN, USER_AGENT};
use std::sync::Arc;

/// Client for Garmin Connect using reqwest.
///
/// Every instance owns its own cookie jar, which is the session: the SSO
/// handshake fills it and later calls read it.
#[derive(Clone, Debug)]
pub struct ReqwestGarminClient {
    config: GarminConfig,
    jar: Arc<Jar>,
    client: reqwest::Client,
}

impl ReqwestGarminClient {
    /// Create a new client with an empty session.
    pub fn new(config: GarminConfig) -> Result<Self, GarminError> {
        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .build()
            .map_err(|e| GarminError::Config(format!("cannot build http client: {e}")))?;
        Ok(Self {
            config,
            jar,
            client,
        })
    }

    pub fn config(&self) -> &GarminConfig {
        &self.config
    }

    /// Cookies the session would send to `url`, as a `Cookie` header value.
    pub fn session_cookies(&self, url: &str) -> Option<String> {
        let url = reqwest::Url::parse(url).ok()?;
        self.jar
            .cookies(&url)
            .and_then(|v| v.to_str().ok().map(str::to_string))
    }

    /// Attach the fixed browser-ish headers the SSO portal expects.
    fn with_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header(USER_AGENT, &self.config.user_agent)
            .header(ORIGIN, &self.config.origin)
    }

    async fn execute(
        &self,
        step: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, GarminError> {
        self.execute_request(step, request.build()?).await
    }

    /// Send `request`, log it if asked to, and fail on a non-success status.
    async fn execute_request(
        &self,
        step: &str,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, GarminError> {
        let requested = request.url().to_string();
        let resp = self.client.execute(request).await?;
        self.log_response(step, &requested, &resp);
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }
        Ok(resp)
    }

    /// Execute a request and expect a text response.
    async fn execute_text(
        &self,
        step: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<String, GarminError> {
        let resp = self.execute(step, request).await?;
        Ok(resp.text().await?)
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> GarminError {
        let status = resp.status().as_u16();
        let url = resp.url().to_string();
        let body = resp.text().await.unwrap_or_default();
        let body: String = body.chars().take(256).collect();
        GarminError::Status { status, url, body }
    }

    fn log_response(&self, step: &str, requested: &str, resp: &reqwest::Response) {
        if !self.config.log_responses {
            return;
        }
        let status = resp.status();
        tracing::debug!(
            step,
            status = status.as_u16(),
            reason = status.canonical_reason().unwrap_or(""),
            "response"
        );
        tracing::debug!(step, headers = ?resp.headers(), "response headers");
        tracing::debug!(
            step,
            cookies = self.session_cookies(resp.url().as_str()).unwrap_or_default(),
            "session cookies"
        );
        let final_url = resp.url().as_str();
        if final_url != requested {
            tracing::debug!(step, from = requested, to = final_url, "redirected");
        } else {
            tracing::debug!(step, "no redirects");
        }
    }
}

#[async_trait]
impl GarminClient for ReqwestGarminClient {
    async fn login(&self, credentials: &Credentials) -> Result<(), GarminError> {
        credentials.validate()?;
        tracing::info!("connecting to Garmin Connect as {}", credentials.username);

        let signin = self.config.signin_url();
        let params = signin_params(&self.config);

        self.execute(
            "signin page",
            self.with_headers(self.client.get(&signin)).query(&params),
        )
        .await?;

        let body = self
            .execute_text(
                "signin submit",
                self.with_headers(self.client.post(&signin))
                    .query(&params)
                    .form(&login_form(credentials)),
            )
            .await?;

        let Some(ticket_url) = extract_ticket_url(&body) else {
            tracing::debug!(body = %body, "signin response without ticket");
            return Err(GarminError::Authentication(
                "could not find response URL".into(),
            ));
        };
        tracing::debug!("response url: {}", ticket_url);

        self.execute("service ticket", self.client.get(&ticket_url))
            .await?;
        tracing::info!("logged in as {}", credentials.username);
        Ok(())
    }

    async fn get_activities(&self, range: &DateRange) -> Result<String, GarminError> {
        if range.is_reversed() {
            tracing::warn!("start date is after end date in {}", range);
        }
        let request = self
            .with_headers(self.client.get(self.config.activities_url()))
            .query(&[
                ("startDate", range.start_param()),
                ("endDate", range.end_param()),
            ])
            .build()?;
        tracing::info!("retrieving json data stream from {}", request.url());

        let resp = self.execute_request("activities", request).await?;
        Ok(resp.text().await?)
    }
}
