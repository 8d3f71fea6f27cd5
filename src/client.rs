use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::error::RequestFailure;
use crate::listing;
use crate::models::{AddSubject, RemoveSubject, SubjectRecord, UpdateGrade};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The four operations the remote gradebook service exposes.
pub trait GradebookService {
    async fn show(&self) -> Result<Vec<SubjectRecord>, RequestFailure>;
    async fn add(&self, subject: &str, grade: f64) -> Result<(), RequestFailure>;
    async fn update(&self, subject: &str, new_grade: f64) -> Result<(), RequestFailure>;
    async fn remove(&self, subject: &str) -> Result<(), RequestFailure>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: normalize_base_url(&api_url.into()),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

pub struct HttpGradebook {
    base_url: String,
    http: reqwest::Client,
}

impl HttpGradebook {
    pub fn new(config: &ClientConfig) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: config.api_url.clone(),
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + ?Sized)>,
    ) -> Result<Response, RequestFailure> {
        let request_id = Uuid::new_v4();
        tracing::info!(%method, path, %request_id, "sending gradebook request");

        let mut request = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header(REQUEST_ID_HEADER, request_id.to_string());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(path, %request_id, %status, "gradebook service rejected request");
            return Err(RequestFailure::Status(status));
        }
        Ok(response)
    }
}

impl GradebookService for HttpGradebook {
    async fn show(&self) -> Result<Vec<SubjectRecord>, RequestFailure> {
        let response = self.send(Method::GET, "/show", None::<&()>).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;
        let records = listing::decode(content_type.as_deref(), &body)?;
        tracing::debug!(count = records.len(), "parsed gradebook listing");
        Ok(records)
    }

    async fn add(&self, subject: &str, grade: f64) -> Result<(), RequestFailure> {
        let body = AddSubject { subject, grade };
        self.send(Method::POST, "/add", Some(&body)).await?;
        Ok(())
    }

    async fn update(&self, subject: &str, new_grade: f64) -> Result<(), RequestFailure> {
        let body = UpdateGrade { subject, new_grade };
        self.send(Method::PUT, "/update", Some(&body)).await?;
        Ok(())
    }

    async fn remove(&self, subject: &str) -> Result<(), RequestFailure> {
        let body = RemoveSubject { subject };
        self.send(Method::DELETE, "/remove", Some(&body)).await?;
        Ok(())
    }
}
