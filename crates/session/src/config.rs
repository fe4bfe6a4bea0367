use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_COOKIE_NAME: &str = "auth-token";
const DEFAULT_MAX_AGE: i64 = 60 * 60 * 24 * 7;

#[derive(Deserialize)]
pub struct Config {
    secret: Option<Arc<str>>,
    cookie_name: Option<Arc<str>>,
    max_age: Option<i64>,
}

impl Config {
    pub fn new() -> envy::Result<Self> {
        ConfigBuilder::default().build()
    }

    pub fn builder<'a>() -> ConfigBuilder<'a> {
        ConfigBuilder::default()
    }

    pub fn secret(&self) -> &str {
        self.secret.as_deref().unwrap()
    }

    pub fn cookie_name(&self) -> &str {
        self.cookie_name.as_deref().unwrap_or(DEFAULT_COOKIE_NAME)
    }

    pub fn max_age(&self) -> i64 {
        self.max_age.unwrap_or(DEFAULT_MAX_AGE)
    }
}

#[derive(Default)]
pub struct ConfigBuilder<'a> {
    prefix: Option<&'a str>,
}

impl<'a> ConfigBuilder<'a> {
    pub fn with_prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn build(self) -> envy::Result<Config> {
        let cfg: Config = if let Some(prefix) = self.prefix {
            envy::prefixed(prefix)
        } else {
            envy::prefixed("AUTH_")
        }
        .from_env()?;
        // There is no fallback secret. Refusing to start beats signing
        // sessions with a literal.
        if cfg.secret.as_deref().map(str::is_empty).unwrap_or(true) {
            return Err(envy::Error::Custom(
                "AUTH_SECRET must be set to a non-empty value".to_string(),
            ));
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn missing_secret_is_fatal_test() {
        assert!(super::Config::builder()
            .with_prefix("AUTH_UNSET_TEST_NOT_SET_IN_SHELL_")
            .build()
            .is_err());
    }

    #[test]
    fn empty_secret_is_fatal_test() {
        std::env::set_var("AUTH_EMPTY_TEST_SECRET", "");
        assert!(super::Config::builder()
            .with_prefix("AUTH_EMPTY_TEST_")
            .build()
            .is_err());
    }

    #[test]
    fn parse_default_config_test() -> envy::Result<()> {
        std::env::set_var("AUTH_DEFAULT_TEST_SECRET", "sessions-test-secret");
        let cfg = super::Config::builder()
            .with_prefix("AUTH_DEFAULT_TEST_")
            .build()?;
        assert_eq!(cfg.secret(), "sessions-test-secret");
        assert_eq!(cfg.cookie_name(), "auth-token");
        assert_eq!(cfg.max_age(), 604800);
        Ok(())
    }

    #[test]
    fn parse_custom_config_test() -> envy::Result<()> {
        std::env::set_var("AUTH_CUSTOM_TEST_SECRET", "sessions-test-secret");
        std::env::set_var("AUTH_CUSTOM_TEST_COOKIE_NAME", "session");
        std::env::set_var("AUTH_CUSTOM_TEST_MAX_AGE", "3600");
        let cfg = super::Config::builder()
            .with_prefix("AUTH_CUSTOM_TEST_")
            .build()?;
        assert_eq!(cfg.cookie_name(), "session");
        assert_eq!(cfg.max_age(), 3600);
        Ok(())
    }
}
