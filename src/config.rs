use std::env;

use crate::models::Currency;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub country_code: String,
    pub currency: Currency,
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url =
            env::var("FEAST_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8000/api".to_string());
        let country_code = env::var("FEAST_COUNTRY_CODE").unwrap_or_else(|_| "263".to_string());
        let currency = env::var("FEAST_CURRENCY")
            .map(Currency::new)
            .unwrap_or_default();
        let token = env::var("FEAST_TOKEN").ok().filter(|t| !t.trim().is_empty());

        Self::new(api_url, country_code, currency, token)
    }

    pub fn new(
        api_url: impl Into<String>,
        country_code: impl Into<String>,
        currency: Currency,
        token: Option<String>,
    ) -> anyhow::Result<Self> {
        let api_url = api_url.into().trim().trim_end_matches('/').to_string();
        if api_url.is_empty() {
            anyhow::bail!("FEAST_API_URL must not be empty");
        }

        let country_code = country_code.into().trim().trim_start_matches('+').to_string();
        if country_code.is_empty() || !country_code.chars().all(|c| c.is_ascii_digit()) {
            anyhow::bail!("FEAST_COUNTRY_CODE must be digits, got {country_code:?}");
        }

        Ok(Self {
            api_url,
            country_code,
            currency,
            token,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000/api".to_string(),
            country_code: "263".to_string(),
            currency: Currency::default(),
            token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_url_and_country_code() {
        let config =
            ClientConfig::new("http://feast.local/api/ ", "+263", Currency::default(), None)
                .unwrap();
        assert_eq!(config.api_url, "http://feast.local/api");
        assert_eq!(config.country_code, "263");
    }

    #[test]
    fn new_rejects_non_numeric_country_code() {
        assert!(ClientConfig::new("http://x", "ZW", Currency::default(), None).is_err());
        assert!(ClientConfig::new("", "263", Currency::default(), None).is_err());
    }
}
