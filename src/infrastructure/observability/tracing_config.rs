use super::Environment;

/// How the tracing subscriber is set up, read from `APP_ENV` and
/// `LOG_FORMAT`.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: Environment,
    pub json_format: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        let environment = std::env::var("APP_ENV")
            .ok()
            .and_then(|value| Environment::try_from(value).ok())
            .unwrap_or_default();
        let json_format =
            std::env::var("LOG_FORMAT").is_ok_and(|value| value.eq_ignore_ascii_case("json"));

        Self {
            environment,
            json_format,
        }
    }
}
