//! Process-level configuration.
//!
//! Deliberately small: the gateway's only process-wide state is what it
//! needs to start listening — everything that varies per request
//! (credentials, model choice, contexts) arrives in the request body and is
//! dropped with it. These knobs are initialized once at startup and never
//! mutated.

use std::path::PathBuf;

use crate::error::GatewayError;

/// Configuration for one gateway process.
///
/// Built via [`ServerConfig::builder()`] or [`ServerConfig::default()`].
///
/// # Example
/// ```rust
/// use mathsheet_gateway::ServerConfig;
///
/// let config = ServerConfig::builder()
///     .port(9000)
///     .static_root("web/dist")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on. Default: 8000.
    pub port: u16,

    /// Directory holding the prebuilt front-end assets. Default: `dist`.
    ///
    /// Requests that match no API route are served from here, falling back
    /// to `index.html` so client-side routing works.
    pub static_root: PathBuf,

    /// Per-upstream-call timeout in seconds. Default: 120.
    ///
    /// The pipelines impose no timeout of their own; this is the only bound
    /// on how long a request can hang on a slow model endpoint. Analyze
    /// makes two sequential calls, so its worst case is twice this value.
    pub api_timeout_secs: u64,

    /// Token cap for OCR completions. Default: 2000.
    ///
    /// A transcription of one handwritten page fits comfortably; the cap
    /// keeps a confused vision model from generating unbounded output at
    /// the caller's expense.
    pub max_ocr_tokens: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            static_root: PathBuf::from("dist"),
            api_timeout_secs: 120,
            max_ocr_tokens: 2000,
        }
    }
}

impl ServerConfig {
    /// Create a new builder for `ServerConfig`.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ServerConfig`].
#[derive(Debug)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn static_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.static_root = root.into();
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn max_ocr_tokens(mut self, tokens: u32) -> Self {
        self.config.max_ocr_tokens = tokens;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ServerConfig, GatewayError> {
        let c = &self.config;
        if c.api_timeout_secs == 0 {
            return Err(GatewayError::Internal(
                "api_timeout_secs must be ≥ 1".into(),
            ));
        }
        if c.max_ocr_tokens == 0 {
            return Err(GatewayError::Internal("max_ocr_tokens must be ≥ 1".into()));
        }
        Ok(self.config)
    }
}
