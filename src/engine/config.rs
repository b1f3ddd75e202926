use anyhow::{bail, Result};

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the text and image services.
#[derive(Clone)]
pub struct ServiceConfig {
    pub api_key: String,
    pub text_model: String,
    pub image_model: String,
    pub api_base: String,
}

impl ServiceConfig {
    /// Reads `API_KEY` (required) plus the optional
    /// `ADVENTURE_TEXT_MODEL`, `ADVENTURE_IMAGE_MODEL` and `ADVENTURE_API_BASE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let set = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let Some(api_key) = set("API_KEY") else {
            bail!("API_KEY environment variable is not set");
        };

        Ok(Self {
            api_key: api_key.trim().to_string(),
            text_model: set("ADVENTURE_TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.into()),
            image_model: set("ADVENTURE_IMAGE_MODEL").unwrap_or_else(|| DEFAULT_IMAGE_MODEL.into()),
            api_base: set("ADVENTURE_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.into()),
        })
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &"<redacted>")
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = ServiceConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("API_KEY"));

        assert!(ServiceConfig::from_lookup(lookup(&[("API_KEY", "  ")])).is_err());
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = ServiceConfig::from_lookup(lookup(&[("API_KEY", "secret")])).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn overrides_are_honoured() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("API_KEY", "secret"),
            ("ADVENTURE_TEXT_MODEL", "gemini-2.0-flash"),
            ("ADVENTURE_API_BASE", "http://localhost:8080/v1beta/"),
        ]))
        .unwrap();

        assert_eq!(config.text_model, "gemini-2.0-flash");
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.api_base, "http://localhost:8080/v1beta");
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = ServiceConfig::from_lookup(lookup(&[("API_KEY", "secret")])).unwrap();
        assert!(!format!("{config:?}").contains("secret"));
    }
}
