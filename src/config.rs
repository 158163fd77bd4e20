use std::env;
use secrecy::SecretString;
use uuid::Uuid;

pub const DEFAULT_LLM_API_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_LLM_MODEL_NAME: &str = "llama3-70b-8192";

#[derive(Clone, Debug)]
pub struct Config {
    pub groq_api_key: Option<SecretString>,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub session_secret: SecretString,
    /// True when `SECRET_KEY` was unset and a throwaway key was generated.
    pub session_secret_generated: bool,
    pub templates_dir: String,
    pub max_upload_bytes: usize,
    pub session_ttl_minutes: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let (session_secret, session_secret_generated) = match lookup("SECRET_KEY") {
            Some(secret) if !secret.trim().is_empty() => (SecretString::from(secret), false),
            _ => (SecretString::from(generate_secret()), true),
        };

        Self {
            groq_api_key: lookup("GROQ_API_KEY")
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from),
            llm_api_base_url: lookup("LLM_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_LLM_API_BASE_URL.to_string()),
            llm_model_name: lookup("LLM_MODEL_NAME")
                .unwrap_or_else(|| DEFAULT_LLM_MODEL_NAME.to_string()),
            web_server_host: lookup("WEB_SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            web_server_port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            session_secret,
            session_secret_generated,
            templates_dir: lookup("TEMPLATES_DIR").unwrap_or_else(|| "templates".to_string()),
            max_upload_bytes: lookup("MAX_UPLOAD_BYTES")
                .and_then(|b| b.parse().ok())
                .unwrap_or(20 * 1024 * 1024),
            session_ttl_minutes: lookup("SESSION_TTL_MINUTES")
                .and_then(|m| m.parse().ok())
                .filter(|m: &i64| *m > 0)
                .unwrap_or(120),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.groq_api_key.is_some()
    }

    #[cfg(any(test, feature = "test-utils"))]
    pub fn test_config() -> Self {
        Self {
            groq_api_key: Some(SecretString::from("test_api_key".to_string())),
            llm_api_base_url: "http://127.0.0.1:9/v1".to_string(),
            llm_model_name: "test-model".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            session_secret: SecretString::from("test_session_secret".to_string()),
            session_secret_generated: false,
            templates_dir: "templates".to_string(),
            max_upload_bytes: 1024 * 1024,
            session_ttl_minutes: 120,
        }
    }
}

/// Per-process signing key; sessions do not survive a restart without `SECRET_KEY`.
fn generate_secret() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_config_defaults_when_nothing_is_set() {
        let config = config_from(&[]);

        assert!(config.groq_api_key.is_none());
        assert_eq!(config.llm_api_base_url, DEFAULT_LLM_API_BASE_URL);
        assert_eq!(config.llm_model_name, DEFAULT_LLM_MODEL_NAME);
        assert_eq!(config.web_server_host, "0.0.0.0");
        assert_eq!(config.web_server_port, 5000);
        assert_eq!(config.templates_dir, "templates");
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
        assert_eq!(config.session_ttl_minutes, 120);
        assert!(config.session_secret_generated);
        assert_eq!(config.session_secret.expose_secret().len(), 64);
    }

    #[test]
    fn test_config_reads_overrides() {
        let config = config_from(&[
            ("GROQ_API_KEY", "gsk_live"),
            ("LLM_MODEL_NAME", "mixtral"),
            ("PORT", "8080"),
            ("SECRET_KEY", "stable-secret"),
            ("MAX_UPLOAD_BYTES", "1024"),
            ("SESSION_TTL_MINUTES", "15"),
        ]);

        assert_eq!(
            config.groq_api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("gsk_live".to_string())
        );
        assert_eq!(config.llm_model_name, "mixtral");
        assert_eq!(config.web_server_port, 8080);
        assert!(!config.session_secret_generated);
        assert_eq!(config.session_secret.expose_secret(), "stable-secret");
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.session_ttl_minutes, 15);
    }

    #[test]
    fn test_config_ignores_blank_and_invalid_values() {
        let config = config_from(&[
            ("GROQ_API_KEY", "  "),
            ("SECRET_KEY", ""),
            ("PORT", "not-a-port"),
            ("SESSION_TTL_MINUTES", "-5"),
        ]);

        assert!(!config.has_api_key());
        assert!(config.session_secret_generated);
        assert_eq!(config.web_server_port, 5000);
        assert_eq!(config.session_ttl_minutes, 120);
    }

    #[test]
    fn test_generated_secret_is_not_a_fixed_placeholder() {
        let first = generate_secret();
        let second = generate_secret();

        assert_eq!(first.len(), 64);
        assert_ne!(first, second);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert!(config.has_api_key());
        assert_eq!(config.llm_model_name, "test-model");
        assert_eq!(config.web_server_port, 5000);
    }
}
