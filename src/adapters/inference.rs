use crate::core::schema::parse_candidate_body;
use crate::domain::model::{BuildRequest, BuildResult, OwnedComponent};
use crate::domain::ports::{BuildGenerator, UpstreamSettings};
use crate::utils::error::{AdvisorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// Hosted inference endpoint that answers with a build in the target schema.
pub struct InferenceClient {
    client: Client,
    settings: UpstreamSettings,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    budget: f64,
    currency: &'static str,
    owned: Vec<&'a OwnedComponent>,
    required_components: Vec<&'static str>,
}

impl InferenceClient {
    pub fn new(settings: UpstreamSettings) -> Result<Self> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    pub fn endpoint(&self) -> &str {
        &self.settings.endpoint
    }
}

#[async_trait]
impl BuildGenerator for InferenceClient {
    fn name(&self) -> &str {
        "inference endpoint"
    }

    async fn generate(&self, request: &BuildRequest) -> Result<BuildResult> {
        let body = GenerateRequest {
            model: self.settings.model.as_deref(),
            budget: request.budget.amount(),
            currency: "PHP",
            owned: request.owned.effective().collect(),
            required_components: request
                .required_slots()
                .into_iter()
                .map(|slot| slot.key())
                .collect(),
        };

        tracing::debug!("Making inference request to: {}", self.settings.endpoint);
        let response = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(&self.settings.api_token)
            .json(&body)
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        tracing::debug!("Inference response status: {}", status);

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AdvisorError::UpstreamUnavailable {
                message: format!("endpoint returned {}: {}", status, detail.trim()),
            });
        }

        let text = response.text().await.map_err(unavailable)?;
        parse_candidate_body(&text)
    }
}

fn unavailable(e: reqwest::Error) -> AdvisorError {
    let message = if e.is_timeout() {
        format!("request timed out: {}", e)
    } else {
        e.to_string()
    };
    AdvisorError::UpstreamUnavailable { message }
}
