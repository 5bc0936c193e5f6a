use std::net::{IpAddr, SocketAddr};

/// Runtime configuration, read from the process environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: IpAddr,
    pub server_port: u16,
    pub environment: Environment,
    pub log_level: String,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Unrecognized values fall back to development rather than failing
    /// startup.
    fn parse(value: &str) -> Self {
        match value {
            "production" => Self::Production,
            "staging" => Self::Staging,
            _ => Self::Development,
        }
    }

    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl Config {
    /// Read configuration from the environment, honoring a `.env` file when
    /// one is present.
    ///
    /// `DATABASE_URL` is required. `SERVER_HOST`, `SERVER_PORT`,
    /// `ENVIRONMENT` and `LOG_LEVEL` have development defaults, and `PORT`
    /// (set by most container platforms) takes precedence over
    /// `SERVER_PORT`.
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is missing or when the host or port values
    /// do not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = require("DATABASE_URL")?;
        let environment = Environment::parse(&env_or("ENVIRONMENT", "development"));

        let port_raw = std::env::var("PORT").unwrap_or_else(|_| env_or("SERVER_PORT", "3000"));
        let server_port = port_raw
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("SERVER_PORT / PORT is not a valid port: {port_raw}"))?;

        // Production listens on all interfaces so the platform can route
        // traffic; everywhere else stays on loopback.
        let host_default = if environment == Environment::Production {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };
        let host_raw = env_or("SERVER_HOST", host_default);
        let server_host = host_raw
            .parse::<IpAddr>()
            .map_err(|_| anyhow::anyhow!("SERVER_HOST is not a valid IP address: {host_raw}"))?;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            environment,
            log_level: env_or("LOG_LEVEL", "info"),
        })
    }

    /// Address the HTTP listener binds to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server_host, self.server_port)
    }
}

fn require(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("{key} must be set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = Config {
            database_url: String::new(),
            server_host: IpAddr::from([0, 0, 0, 0]),
            server_port: 8080,
            environment: Environment::Production,
            log_level: "debug".to_string(),
        };
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_environment_parse_falls_back_to_development() {
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("staging"), Environment::Staging);
        assert_eq!(Environment::parse("anything-else"), Environment::Development);
    }
}
