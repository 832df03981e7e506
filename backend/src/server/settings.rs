//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USERS_GRAPHQL_*` environment variables or a
//! configuration file, and resolve into a [`ServerConfig`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use super::config::ServerConfig;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_STORE_URL: &str = "http://localhost:3000";

/// Errors raised while resolving settings into a [`ServerConfig`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The listen host is not an IP address.
    #[error("invalid listen host {host:?}: {source}")]
    Host {
        /// Rejected host value.
        host: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// The directory base URL could not be parsed.
    #[error("invalid store url {url:?}: {source}")]
    StoreUrl {
        /// Rejected URL value.
        url: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
    /// The directory base URL cannot have resource paths appended.
    #[error("store url {url:?} must be an http(s) base url")]
    StoreUrlScheme {
        /// Rejected URL value.
        url: String,
    },
}

/// Configuration values controlling the listener and the directory adapter.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_GRAPHQL")]
pub struct ServerSettings {
    /// IP address to listen on.
    pub host: Option<String>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Base URL of the REST directory.
    pub store_url: Option<String>,
    /// Turn off the GraphiQL page on `GET /graphql`.
    #[ortho_config(default = false)]
    pub disable_graphiql: bool,
}

impl ServerSettings {
    /// Return the configured port, falling back to the default.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Return the configured store URL, falling back to the default.
    #[must_use]
    pub fn store_url(&self) -> &str {
        self.store_url.as_deref().unwrap_or(DEFAULT_STORE_URL)
    }

    /// Resolve the listen address.
    ///
    /// # Errors
    /// Returns [`SettingsError::Host`] when the host is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.host.as_deref() {
            Some(host) => host.trim().parse().map_err(|source| SettingsError::Host {
                host: host.to_owned(),
                source,
            })?,
            None => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(host, self.port()))
    }

    /// Resolve the settings into a server configuration.
    ///
    /// # Errors
    /// Returns a [`SettingsError`] when the host or store URL is invalid.
    pub fn server_config(&self) -> Result<ServerConfig, SettingsError> {
        let raw = self.store_url();
        let store_url = Url::parse(raw).map_err(|source| SettingsError::StoreUrl {
            url: raw.to_owned(),
            source,
        })?;
        if store_url.cannot_be_a_base() || !matches!(store_url.scheme(), "http" | "https") {
            return Err(SettingsError::StoreUrlScheme {
                url: raw.to_owned(),
            });
        }
        Ok(ServerConfig::new(self.bind_addr()?, store_url).with_graphiql(!self.disable_graphiql))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "USERS_GRAPHQL_HOST",
        "USERS_GRAPHQL_PORT",
        "USERS_GRAPHQL_STORE_URL",
        "USERS_GRAPHQL_DISABLE_GRAPHIQL",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("users-graphql")])
            .expect("config should load")
    }

    fn settings(host: Option<&str>, store_url: Option<&str>) -> ServerSettings {
        ServerSettings {
            host: host.map(str::to_owned),
            port: None,
            store_url: store_url.map(str::to_owned),
            disable_graphiql: false,
        }
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        let config = settings.server_config().expect("defaults resolve");
        assert_eq!(config.bind_addr(), "0.0.0.0:4000".parse::<SocketAddr>().expect("addr"));
        assert_eq!(config.store_url().as_str(), "http://localhost:3000/");
        assert!(config.graphiql());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USERS_GRAPHQL_HOST", Some("127.0.0.1".to_owned())),
            ("USERS_GRAPHQL_PORT", Some("4100".to_owned())),
            (
                "USERS_GRAPHQL_STORE_URL",
                Some("http://store.internal:8080/api/".to_owned()),
            ),
            ("USERS_GRAPHQL_DISABLE_GRAPHIQL", Some("true".to_owned())),
        ]);

        let config = load_from_empty_args()
            .server_config()
            .expect("overrides resolve");
        assert_eq!(config.bind_addr(), "127.0.0.1:4100".parse::<SocketAddr>().expect("addr"));
        assert_eq!(
            config.store_url().as_str(),
            "http://store.internal:8080/api/"
        );
        assert!(!config.graphiql());
    }

    #[rstest]
    fn rejects_hostnames() {
        let error = settings(Some("localhost"), None)
            .server_config()
            .expect_err("hostnames are not IP addresses");
        assert!(matches!(error, SettingsError::Host { .. }));
    }

    #[rstest]
    #[case::unparseable("not a url")]
    #[case::non_http("mailto:store@example.com")]
    #[case::ftp("ftp://store.internal/")]
    fn rejects_unusable_store_urls(#[case] url: &str) {
        let error = settings(None, Some(url))
            .server_config()
            .expect_err("store url must be http(s)");
        assert!(matches!(
            error,
            SettingsError::StoreUrl { .. } | SettingsError::StoreUrlScheme { .. }
        ));
    }
}
