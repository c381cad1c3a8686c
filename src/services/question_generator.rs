use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Chunking parameters forwarded to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    pub questions_per_chunk: u32,
    pub chunk_size: u32,
    pub overlap: u32,
}

impl GenerationParams {
    pub fn from_config(config: &Config) -> Self {
        Self {
            questions_per_chunk: config.questions_per_chunk,
            chunk_size: config.chunk_size,
            overlap: config.chunk_overlap,
        }
    }

    /// Applies per-request overrides on top of these defaults.
    pub fn with_overrides(
        self,
        questions_per_chunk: Option<u32>,
        chunk_size: Option<u32>,
        overlap: Option<u32>,
    ) -> AppResult<Self> {
        let params = Self {
            questions_per_chunk: questions_per_chunk.unwrap_or(self.questions_per_chunk),
            chunk_size: chunk_size.unwrap_or(self.chunk_size),
            overlap: overlap.unwrap_or(self.overlap),
        };

        if params.overlap >= params.chunk_size {
            return Err(AppError::ValidationError(format!(
                "overlap ({}) must be smaller than chunk size ({})",
                params.overlap, params.chunk_size
            )));
        }
        Ok(params)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationSource {
    Text(String),
    File { file_name: String, bytes: Vec<u8> },
}

impl GenerationSource {
    /// Only PDF and plain-text documents are accepted.
    pub fn file(file_name: &str, bytes: Vec<u8>) -> AppResult<Self> {
        if bytes.is_empty() {
            return Err(AppError::ValidationError("uploaded file is empty".to_string()));
        }
        document_mime(file_name)?;

        Ok(GenerationSource::File {
            file_name: file_name.to_string(),
            bytes,
        })
    }
}

fn document_mime(file_name: &str) -> AppResult<&'static str> {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".pdf") {
        Ok("application/pdf")
    } else if lower.ends_with(".txt") {
        Ok("text/plain")
    } else {
        Err(AppError::ValidationError(format!(
            "unsupported file type for '{}': only .pdf and .txt are accepted",
            file_name
        )))
    }
}

/// One multiple-choice item as produced by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedItem {
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_index: Option<i64>,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    mcqs: Vec<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(
        &self,
        source: GenerationSource,
        params: GenerationParams,
    ) -> AppResult<Vec<GeneratedItem>>;

    async fn health(&self) -> AppResult<()>;
}

pub struct HttpQuestionGenerator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpQuestionGenerator {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.generator_timeout_secs))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.generator_url.trim_end_matches('/').to_string(),
        })
    }

    fn form(source: GenerationSource, params: GenerationParams) -> AppResult<Form> {
        let form = Form::new()
            .text("questionsPerChunk", params.questions_per_chunk.to_string())
            .text("chunkSize", params.chunk_size.to_string())
            .text("overlap", params.overlap.to_string());

        let form = match source {
            GenerationSource::Text(text) => form.text("text", text),
            GenerationSource::File { file_name, bytes } => {
                let mime = document_mime(&file_name)?;
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(mime)
                    .map_err(|e| AppError::InternalError(format!("Invalid MIME type: {}", e)))?;
                form.part("file", part)
            }
        };
        Ok(form)
    }
}

#[async_trait]
impl QuestionGenerator for HttpQuestionGenerator {
    async fn generate(
        &self,
        source: GenerationSource,
        params: GenerationParams,
    ) -> AppResult<Vec<GeneratedItem>> {
        let url = format!("{}/api/generate-mcq", self.base_url);
        log::info!("Requesting questions from {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(Self::form(source, params)?)
            .send()
            .await
            .map_err(|e| {
                log::error!("Failed to reach question generator: {}", e);
                AppError::GenerationError(format!("question generator unreachable: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: Option<GenerateResponse> = serde_json::from_str(&body).ok();

        if let Some(error) = parsed.as_ref().and_then(|r| r.error.clone()) {
            log::error!("Question generator error ({}): {}", status, error);
            return Err(AppError::GenerationError(error));
        }
        if !status.is_success() {
            return Err(AppError::GenerationError(format!(
                "question generator returned {}",
                status
            )));
        }

        let parsed = parsed.ok_or_else(|| {
            AppError::GenerationError("question generator returned malformed JSON".to_string())
        })?;

        let items = parsed
            .mcqs
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| match serde_json::from_value::<GeneratedItem>(value) {
                Ok(item) => Some(item),
                Err(err) => {
                    log::warn!("Skipping generated item {}: {}", i, err);
                    None
                }
            })
            .collect();

        Ok(items)
    }

    async fn health(&self) -> AppResult<()> {
        let url = format!("{}/api/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::GenerationError(format!(
                "question generator health returned {}",
                response.status()
            )))
        }
    }
}
