//! HTTP portal client implementation.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use courtside_core::codes::TemporaryCode;
use courtside_core::model::AssessmentForm;
use courtside_core::submission::Submission;
use courtside_core::traits::PortalApi;

use crate::error::PortalError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// JSON-over-HTTP client for the portal's assessment endpoints.
pub struct PortalClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl PortalClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Map transport failures and non-success statuses to typed errors.
    async fn check(response: Result<reqwest::Response, reqwest::Error>) -> anyhow::Result<reqwest::Response> {
        let response = response.map_err(|e| {
            if e.is_timeout() {
                PortalError::Timeout(DEFAULT_TIMEOUT_SECS)
            } else {
                PortalError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(PortalError::AuthenticationFailed(body).into());
        }
        if status == 404 {
            return Err(PortalError::NotFound(response.url().path().to_string()).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<PortalErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(PortalError::ApiError { status, message }.into());
        }

        Ok(response)
    }
}

#[derive(Deserialize)]
struct PortalErrorBody {
    message: String,
}

/// Single-record responses arrive wrapped in a `data` envelope.
#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClearResponse {
    deleted_count: u64,
}

#[async_trait]
impl PortalApi for PortalClient {
    async fn fetch_forms(&self) -> anyhow::Result<Vec<AssessmentForm>> {
        let response = self
            .request(reqwest::Method::GET, "/api/assessment/forms")
            .send()
            .await;
        Ok(Self::check(response).await?.json().await?)
    }

    #[instrument(skip(self, form), fields(code = ?form.code))]
    async fn save_form(&self, form: &AssessmentForm) -> anyhow::Result<AssessmentForm> {
        let response = self
            .request(reqwest::Method::POST, "/api/assessment/forms")
            .json(form)
            .send()
            .await;
        let envelope: DataEnvelope<AssessmentForm> =
            Self::check(response).await?.json().await?;
        Ok(envelope.data)
    }

    async fn delete_form(&self, code: &str) -> anyhow::Result<()> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                &format!("/api/assessment/forms/{code}"),
            )
            .send()
            .await;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self, temp), fields(code = %temp.temp_code))]
    async fn issue_temp_code(&self, temp: &TemporaryCode) -> anyhow::Result<TemporaryCode> {
        let response = self
            .request(reqwest::Method::POST, "/api/assessment/temp-codes")
            .json(temp)
            .send()
            .await;
        let envelope: DataEnvelope<TemporaryCode> = Self::check(response).await?.json().await?;
        Ok(envelope.data)
    }

    async fn fetch_temp_codes(&self) -> anyhow::Result<Vec<TemporaryCode>> {
        let response = self
            .request(reqwest::Method::GET, "/api/assessment/temp-codes")
            .send()
            .await;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_temp_code(&self, temp_code: &str) -> anyhow::Result<()> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                &format!("/api/assessment/temp-codes/{temp_code}"),
            )
            .send()
            .await;
        // Deleting an already-gone code reports success to the caller.
        match Self::check(response).await {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.downcast_ref(), Some(PortalError::NotFound(_))) => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn fetch_submissions(&self) -> anyhow::Result<Vec<Submission>> {
        let response = self
            .request(reqwest::Method::GET, "/api/assessment/submissions")
            .send()
            .await;
        Ok(Self::check(response).await?.json().await?)
    }

    #[instrument(skip(self, submission), fields(form = %submission.form_code))]
    async fn save_submission(&self, submission: &Submission) -> anyhow::Result<Submission> {
        let response = self
            .request(reqwest::Method::POST, "/api/assessment/submissions")
            .json(submission)
            .send()
            .await;
        let envelope: DataEnvelope<Submission> = Self::check(response).await?.json().await?;
        Ok(envelope.data)
    }

    async fn clear_submissions(&self) -> anyhow::Result<u64> {
        let response = self
            .request(reqwest::Method::DELETE, "/api/assessment/submissions")
            .send()
            .await;
        let cleared: ClearResponse = Self::check(response).await?.json().await?;
        Ok(cleared.deleted_count)
    }
}
