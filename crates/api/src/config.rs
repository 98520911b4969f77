use std::str::FromStr;
use std::time::Duration;

use greenthreads_gemini::RetryPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Hosted text model settings.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Model for design advisories, textiles and production recommendations.
    pub model: String,
    /// Model for fabric classification, analysis and Q&A.
    pub fabric_model: String,
    pub base_url: String,
}

/// Local diffusion server settings.
#[derive(Debug, Clone)]
pub struct ComfyUIConfig {
    /// HTTP root; the WebSocket URL is derived from it.
    pub url: String,
    pub checkpoint: String,
}

/// Server configuration loaded from environment variables.
///
/// Everything except `GEMINI_API_KEY` has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// Generation can take minutes, so the default is generous.
    pub request_timeout_secs: u64,
    pub database_url: String,
    pub db_max_connections: u32,
    pub gemini: GeminiConfig,
    pub retry: RetryPolicy,
    pub comfyui: ComfyUIConfig,
    /// Generate QR lookup ids and care instructions for new designs.
    pub qr_codes_enabled: bool,
    /// External domain used in QR lookup URLs.
    pub public_domain: Option<String>,
    pub default_user_id: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                                     |
    /// |----------------------------|---------------------------------------------|
    /// | `HOST`                     | `0.0.0.0`                                   |
    /// | `PORT`                     | `3000`                                      |
    /// | `CORS_ORIGINS`             | `http://localhost:8501`                     |
    /// | `REQUEST_TIMEOUT_SECS`     | `900`                                       |
    /// | `DATABASE_URL`             | `sqlite://greenthreads.db?mode=rwc`         |
    /// | `DB_MAX_CONNECTIONS`       | `5`                                         |
    /// | `GEMINI_API_KEY`           | required                                    |
    /// | `GEMINI_MODEL`             | `gemini-1.5-pro`                            |
    /// | `GEMINI_FABRIC_MODEL`      | `gemini-1.5-flash`                          |
    /// | `GEMINI_BASE_URL`          | `https://generativelanguage.googleapis.com` |
    /// | `RETRY_MAX_ATTEMPTS`       | `5`                                         |
    /// | `RETRY_INITIAL_DELAY_SECS` | `120`                                       |
    /// | `RETRY_MULTIPLIER`         | `2.0`                                       |
    /// | `RETRY_MAX_DELAY_SECS`     | `300`                                       |
    /// | `RETRY_DEADLINE_SECS`      | `600`                                       |
    /// | `COMFYUI_URL`              | `http://127.0.0.1:8188`                     |
    /// | `COMFYUI_CHECKPOINT`       | `v1-5-pruned-emaonly.safetensors`           |
    /// | `QR_CODES_ENABLED`         | `false`                                     |
    /// | `PUBLIC_DOMAIN`            | unset                                       |
    /// | `DEFAULT_USER_ID`          | `default_user`                              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);
        let defaults = RetryPolicy::default();

        let api_key = env
            .string("GEMINI_API_KEY")
            .ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;

        let cors_origins = env
            .string("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:8501".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let retry = RetryPolicy {
            max_attempts: env.parse("RETRY_MAX_ATTEMPTS", defaults.max_attempts)?,
            initial_delay: env.secs("RETRY_INITIAL_DELAY_SECS", defaults.initial_delay)?,
            multiplier: env.parse("RETRY_MULTIPLIER", defaults.multiplier)?,
            max_delay: env.secs("RETRY_MAX_DELAY_SECS", defaults.max_delay)?,
            deadline: env.secs("RETRY_DEADLINE_SECS", defaults.deadline)?,
        };
        if retry.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                var: "RETRY_MAX_ATTEMPTS",
                value: "0".into(),
                reason: "at least one attempt is required".into(),
            });
        }
        if !retry.multiplier.is_finite() || retry.multiplier < 1.0 {
            return Err(ConfigError::Invalid {
                var: "RETRY_MULTIPLIER",
                value: retry.multiplier.to_string(),
                reason: "must be a finite number of at least 1.0".into(),
            });
        }

        Ok(Self {
            host: env.string("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: env.parse("PORT", 3000)?,
            cors_origins,
            request_timeout_secs: env.parse("REQUEST_TIMEOUT_SECS", 900)?,
            database_url: env
                .string("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://greenthreads.db?mode=rwc".into()),
            db_max_connections: env.parse("DB_MAX_CONNECTIONS", 5)?,
            gemini: GeminiConfig {
                api_key,
                model: env.string("GEMINI_MODEL").unwrap_or_else(|| "gemini-1.5-pro".into()),
                fabric_model: env
                    .string("GEMINI_FABRIC_MODEL")
                    .unwrap_or_else(|| "gemini-1.5-flash".into()),
                base_url: env
                    .string("GEMINI_BASE_URL")
                    .unwrap_or_else(|| greenthreads_gemini::api::DEFAULT_BASE_URL.into()),
            },
            retry,
            comfyui: ComfyUIConfig {
                url: env
                    .string("COMFYUI_URL")
                    .unwrap_or_else(|| "http://127.0.0.1:8188".into()),
                checkpoint: env
                    .string("COMFYUI_CHECKPOINT")
                    .unwrap_or_else(|| "v1-5-pruned-emaonly.safetensors".into()),
            },
            qr_codes_enabled: env.flag("QR_CODES_ENABLED")?,
            public_domain: env.string("PUBLIC_DOMAIN"),
            default_user_id: env
                .string("DEFAULT_USER_ID")
                .unwrap_or_else(|| "default_user".into()),
        })
    }

    /// Base for QR lookup URLs: the public domain, or the bind address.
    pub fn care_base_url(&self) -> String {
        match &self.public_domain {
            Some(domain) => domain.clone(),
            None => format!("http://{}:{}", self.host, self.port),
        }
    }
}

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Non-blank value of `var`.
    fn string(&self, var: &str) -> Option<String> {
        (self.0)(var)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse<T>(&self, var: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.string(var) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            }),
        }
    }

    fn secs(&self, var: &'static str, default: Duration) -> Result<Duration, ConfigError> {
        self.parse(var, default.as_secs()).map(Duration::from_secs)
    }

    fn flag(&self, var: &'static str) -> Result<bool, ConfigError> {
        match self.string(var).map(|v| v.to_ascii_lowercase()).as_deref() {
            None | Some("false" | "0" | "no" | "off") => Ok(false),
            Some("true" | "1" | "yes" | "on") => Ok(true),
            Some(other) => Err(ConfigError::Invalid {
                var,
                value: other.to_string(),
                reason: "expected true or false".into(),
            }),
        }
    }
}
