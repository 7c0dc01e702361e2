use serde::{Deserialize, Serialize};

fn default_bind_addr() -> String {
    "127.0.0.1:8087".to_owned()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// API gateway configuration (`api_gateway` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiGatewayConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Prefix for module routes: empty, or starting with `/` and not ending with `/`.
    /// Health routes always stay at the root.
    #[serde(default)]
    pub base_path: String,

    /// Requests running longer than this get `504 Gateway Timeout`.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub cors_enabled: bool,

    /// CORS settings; defaults apply when omitted
    #[serde(default)]
    pub cors: Option<CorsConfig>,
}

impl Default for ApiGatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            base_path: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
            cors_enabled: false,
            cors: None,
        }
    }
}

impl ApiGatewayConfig {
    /// Check values serde cannot check.
    ///
    /// # Errors
    /// Returns an error on an unparsable `bind_addr`, a malformed `base_path`,
    /// a zero timeout, or wildcard CORS origins combined with credentials.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.socket_addr()?;

        let base = self.base_path.as_str();
        if !base.is_empty() && (!base.starts_with('/') || base.ends_with('/')) {
            anyhow::bail!(
                "api_gateway.base_path '{base}' must be empty or start with '/' and not end with '/'"
            );
        }

        if self.request_timeout_secs == 0 {
            anyhow::bail!("api_gateway.request_timeout_secs must be greater than zero");
        }

        if self.cors_enabled {
            let cors = self.cors.clone().unwrap_or_default();
            if cors.allow_credentials && cors.allowed_origins.iter().any(|o| o == "*") {
                anyhow::bail!(
                    "CORS misconfiguration: allowed_origins=['*'] cannot be combined with allow_credentials=true"
                );
            }
        }

        Ok(())
    }

    /// Parsed `bind_addr`.
    ///
    /// # Errors
    /// Returns an error if `bind_addr` is not a socket address.
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        self.bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {e}", self.bind_addr))
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_owned()]
}

fn default_allowed_methods() -> Vec<String> {
    vec!["GET".to_owned()]
}

fn default_allowed_headers() -> Vec<String> {
    vec!["*".to_owned()]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,
    #[serde(default = "default_allowed_headers")]
    pub allowed_headers: Vec<String>,
    #[serde(default)]
    pub allow_credentials: bool,
    /// `Access-Control-Max-Age`; 0 leaves the header out
    #[serde(default)]
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allowed_methods: default_allowed_methods(),
            allowed_headers: default_allowed_headers(),
            allow_credentials: false,
            max_age_seconds: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = ApiGatewayConfig::default();
        assert_eq!(cfg.bind_addr, "127.0.0.1:8087");
        assert_eq!(cfg.request_timeout_secs, 30);
        cfg.validate().unwrap();
    }

    #[test]
    fn base_path_shape_is_checked() {
        for good in ["", "/api", "/api/v1"] {
            let cfg = ApiGatewayConfig {
                base_path: good.to_owned(),
                ..Default::default()
            };
            assert!(cfg.validate().is_ok(), "{good:?}");
        }
        for bad in ["api", "/api/", "/"] {
            let cfg = ApiGatewayConfig {
                base_path: bad.to_owned(),
                ..Default::default()
            };
            assert!(cfg.validate().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn rejects_bad_bind_addr_and_zero_timeout() {
        let cfg = ApiGatewayConfig {
            bind_addr: "localhost".to_owned(),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ApiGatewayConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn wildcard_origin_with_credentials_is_rejected() {
        let cfg = ApiGatewayConfig {
            cors_enabled: true,
            cors: Some(CorsConfig {
                allow_credentials: true,
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("CORS misconfiguration"));
    }
}
