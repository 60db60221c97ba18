//! Gemini API client configuration.

/// Gemini API client configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Overrides the Generative Language API base URL.
    pub base_url: Option<String>,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gemini-2.0-flash".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
            base_url: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = GeminiConfig::new("k")
            .with_model("gemini-1.5-pro")
            .with_max_tokens(256)
            .with_temperature(0.0)
            .with_base_url("http://localhost:9000");
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.max_tokens, 256);
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let debug = format!("{:?}", GeminiConfig::new("sk-test-123"));
        assert!(!debug.contains("sk-test-123"));
        assert!(debug.contains("[REDACTED]"));
    }
}
