//! Hugging Face inference summarization provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use precis_core::error::{PrecisError, PrecisResult};
use precis_core::traits::{GenerationOptions, ModelConfig, SummarizationModel};

/// Hosted inference API base; the model id is appended as a path.
pub const HF_INFERENCE_URL: &str = "https://router.huggingface.co/hf-inference/models";

/// Summarization model served over the Hugging Face inference protocol.
pub struct HuggingFaceSummarizer {
    client: Client,
    config: ModelConfig,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: SummarizationParameters,
    options: RequestOptions,
}

#[derive(Debug, Serialize)]
struct SummarizationParameters {
    min_length: u32,
    max_length: u32,
    do_sample: bool,
}

#[derive(Debug, Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SummarizationResponse {
    Batch(Vec<SummaryOutput>),
    Single(SummaryOutput),
    Error { error: String },
}

impl HuggingFaceSummarizer {
    /// Create a new provider.
    ///
    /// The API key comes from the config, `PRECIS_MODEL_API_KEY` or
    /// `HF_TOKEN`. It is required for the hosted API and optional for a
    /// custom `base_url`.
    pub fn new(config: ModelConfig) -> PrecisResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("PRECIS_MODEL_API_KEY").ok())
            .or_else(|| std::env::var("HF_TOKEN").ok());

        let endpoint = Self::endpoint_for(&config)?;

        if api_key.is_none() && config.base_url.is_none() {
            return Err(PrecisError::Configuration(
                "Hugging Face API key not found. Set HF_TOKEN environment variable or provide api_key in config.".to_string(),
            ));
        }

        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(key) = api_key {
            headers.insert(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", key)
                    .parse()
                    .map_err(|_| PrecisError::Configuration("Invalid API key format".to_string()))?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                PrecisError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// Full request URL: `<base_url>/<model>`.
    fn endpoint_for(config: &ModelConfig) -> PrecisResult<String> {
        if config.model.trim().is_empty() {
            return Err(PrecisError::Configuration("Model id must not be empty".to_string()));
        }

        let base = config.base_url.as_deref().unwrap_or(HF_INFERENCE_URL);
        let base = url::Url::parse(base)
            .map_err(|e| PrecisError::Configuration(format!("Invalid model URL: {}", e)))?;
        Ok(format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            config.model.trim_matches('/')
        ))
    }

    /// Request URL used for every call.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn parse_response(body: &str) -> PrecisResult<String> {
        let response: SummarizationResponse = serde_json::from_str(body)
            .map_err(|e| PrecisError::model_with_source("Failed to parse response", e))?;

        match response {
            SummarizationResponse::Batch(outputs) => outputs
                .into_iter()
                .next()
                .map(|o| o.summary_text)
                .ok_or_else(|| PrecisError::model("Model returned no summary")),
            SummarizationResponse::Single(output) => Ok(output.summary_text),
            SummarizationResponse::Error { error } => Err(PrecisError::model(error)),
        }
    }
}

#[async_trait]
impl SummarizationModel for HuggingFaceSummarizer {
    async fn summarize(&self, text: &str, options: &GenerationOptions) -> PrecisResult<String> {
        let request = SummarizationRequest {
            inputs: text,
            parameters: SummarizationParameters {
                min_length: options.min_length,
                max_length: options.max_length,
                do_sample: options.do_sample,
            },
            options: RequestOptions {
                wait_for_model: true,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| PrecisError::model_with_source("Inference request failed", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PrecisError::model_with_source("Failed to read response body", e))?;

        if !status.is_success() {
            return Err(PrecisError::from_http_status(status.as_u16(), &body));
        }

        let summary = Self::parse_response(&body)?;
        debug!(
            model = %self.config.model,
            input_chars = text.chars().count(),
            summary_chars = summary.chars().count(),
            "Model call complete"
        );
        Ok(summary)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
