use std::{env, str::FromStr};

use crate::errors::{AppError, AppResult};

/// Upper bound for `SESSION_TTL_SECS` (30 days).
pub const MAX_SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    File,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "file" => Ok(StoreBackend::File),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(AppError::ValidationError(format!(
                "Unknown store backend '{}'",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub store_backend: StoreBackend,
    pub data_dir: String,
    pub attempts_key: String,
    pub quizzes_key: String,
    pub generator_url: String,
    pub generator_timeout_secs: u64,
    pub questions_per_chunk: u32,
    pub chunk_size: u32,
    pub chunk_overlap: u32,
    pub recent_scores_window: usize,
    pub session_ttl_secs: u64,
    pub cors_allowed_origin: Option<String>,
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env_or("WEB_SERVER_HOST", "127.0.0.1"),
            web_server_port: env_parsed("WEB_SERVER_PORT", 8080),
            store_backend: env_parsed("STORE_BACKEND", StoreBackend::File),
            data_dir: env_or("DATA_DIR", "./data"),
            attempts_key: env_or("ATTEMPTS_KEY", "quizmaster_attempts"),
            quizzes_key: env_or("QUIZZES_KEY", "quizzes"),
            generator_url: env_or("GENERATOR_URL", "http://localhost:5000"),
            generator_timeout_secs: env_parsed("GENERATOR_TIMEOUT_SECS", 300),
            questions_per_chunk: env_parsed("QUESTIONS_PER_CHUNK", 3),
            chunk_size: env_parsed("CHUNK_SIZE", 2000),
            chunk_overlap: env_parsed("CHUNK_OVERLAP", 200),
            recent_scores_window: env_parsed("RECENT_SCORES_WINDOW", 5),
            session_ttl_secs: env_parsed("SESSION_TTL_SECS", 3600),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }

    /// Rejects settings the services cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        if self.attempts_key.trim().is_empty() || self.quizzes_key.trim().is_empty() {
            return Err(AppError::ValidationError(
                "ATTEMPTS_KEY and QUIZZES_KEY must not be empty".to_string(),
            ));
        }

        if self.attempts_key == self.quizzes_key {
            return Err(AppError::ValidationError(format!(
                "ATTEMPTS_KEY and QUIZZES_KEY must differ (both are '{}')",
                self.attempts_key
            )));
        }

        if self.recent_scores_window == 0 {
            return Err(AppError::ValidationError(
                "RECENT_SCORES_WINDOW must be at least 1".to_string(),
            ));
        }

        if self.session_ttl_secs == 0 || self.session_ttl_secs > MAX_SESSION_TTL_SECS {
            return Err(AppError::ValidationError(format!(
                "SESSION_TTL_SECS must be between 1 and {}, got {}",
                MAX_SESSION_TTL_SECS, self.session_ttl_secs
            )));
        }

        if self.chunk_size == 0 || self.questions_per_chunk == 0 {
            return Err(AppError::ValidationError(
                "CHUNK_SIZE and QUESTIONS_PER_CHUNK must be positive".to_string(),
            ));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(AppError::ValidationError(format!(
                "CHUNK_OVERLAP ({}) must be smaller than CHUNK_SIZE ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            store_backend: StoreBackend::Memory,
            data_dir: "./data-test".to_string(),
            attempts_key: "quizmaster_attempts".to_string(),
            quizzes_key: "quizzes".to_string(),
            generator_url: "http://127.0.0.1:9".to_string(),
            generator_timeout_secs: 1,
            questions_per_chunk: 3,
            chunk_size: 2000,
            chunk_overlap: 200,
            recent_scores_window: 5,
            session_ttl_secs: 3600,
            cors_allowed_origin: None,
        }
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_ttl_secs.min(MAX_SESSION_TTL_SECS) as i64)
    }
}
