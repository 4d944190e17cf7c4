//! Server configuration from command-line flags and environment.

use anyhow::Context;
use axum::http::HeaderValue;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Serve a single Quarto game as JSON", long_about = None)]
pub struct Config {
    /// Interface to listen on
    #[arg(long, env = "QUARTO_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "QUARTO_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Origin allowed by CORS (any origin when omitted)
    #[arg(long, env = "QUARTO_ALLOW_ORIGIN")]
    pub allow_origin: Option<String>,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cors(&self) -> anyhow::Result<CorsLayer> {
        let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
        match &self.allow_origin {
            None => Ok(cors.allow_origin(Any)),
            Some(origin) => {
                let origin: HeaderValue = origin
                    .parse()
                    .with_context(|| format!("invalid CORS origin: {}", origin))?;
                Ok(cors.allow_origin(origin))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_flags() {
        let config = Config::try_parse_from([
            "quarto-api",
            "--host",
            "127.0.0.1",
            "--port",
            "9100",
            "--allow-origin",
            "http://localhost:5173",
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9100");
        assert!(config.cors().is_ok());
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Config::try_parse_from(["quarto-api", "--port", "99999"]).is_err());
    }

    #[test]
    fn test_rejects_bad_origin() {
        let config = Config {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allow_origin: Some("bad\norigin".to_string()),
        };
        assert!(config.cors().is_err());
    }
}
