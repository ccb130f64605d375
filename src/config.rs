use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,

    // Routing
    /// Keep the request's query string on locale redirects
    pub redirect_preserve_query: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: match std::env::var("PORT") {
                Ok(value) => value
                    .parse()
                    .with_context(|| format!("PORT must be a port number, got '{}'", value))?,
                Err(_) => 8080,
            },

            // Routing
            redirect_preserve_query: std::env::var("REDIRECT_PRESERVE_QUERY")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        })
    }

    /// `host:port` for binding the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            redirect_preserve_query: false,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
