use crate::configuration::Configuration;

const DEFAULT_PORT: u16 = 3000;

/// Configuration from CLI flags with environment fallback; `.env` is loaded
/// by `main` before this is built.
#[derive(Clone)]
pub struct EnvConfiguration {
    port: Option<u16>,
    database_url: Option<String>,
}

impl EnvConfiguration {
    pub fn new(port: Option<u16>, database_url: Option<String>) -> Self {
        Self { port, database_url }
    }
}

impl Configuration for EnvConfiguration {
    fn port(&self) -> u16 {
        self.port
            .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
            .unwrap_or(DEFAULT_PORT)
    }

    fn database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
    }

    fn admin_password(&self) -> String {
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "123".into())
    }
}
