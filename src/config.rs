//! Server configuration from the environment: HOST, PORT, ADMIN_TOKEN.

/// Settings for the `web` binary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Token granting every permission; mutating endpoints are closed when unset.
    pub admin_token: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            admin_token: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable ports fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(default_host);
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Invalid PORT {:?}, using {}", raw, default_port());
                default_port()
            }),
            None => default_port(),
        };
        let admin_token = lookup("ADMIN_TOKEN").filter(|t| !t.trim().is_empty());
        Self {
            host,
            port,
            admin_token,
        }
    }
}
