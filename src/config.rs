//! Client configuration.
//!
//! A [`Config`] carries the bearer token, the organization id taken from
//! the portal URL, the regional API server and the success-logging flag.
//! [`Config::from_env`] loads the same `HB_*` variables the test harness
//! uses, with `.env` support via dotenvy.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Environment variable holding the API token.
const ENV_TOKEN: &str = "HB_TOKEN";

/// Environment variable holding the organization id.
const ENV_ORG_ID: &str = "HB_ORGID";

/// Environment variable holding the server region (optional, defaults to US).
const ENV_SERVER: &str = "HB_SERVER";

/// Regional HighBond API servers.
///
/// The region is part of the hostname; tokens are only valid against the
/// region the organization lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Server {
    /// United States (`apis-us.highbond.com`)
    #[default]
    Us,
    /// Canada
    Ca,
    /// Europe
    Eu,
    /// Asia
    Ap,
    /// Oceania
    Au,
    /// Africa
    Af,
    /// South America
    Sa,
    /// US federal government cloud
    Gov,
    /// US state government cloud
    Gov2,
}

impl Server {
    pub fn host(&self) -> &'static str {
        match self {
            Server::Us => "apis-us.highbond.com",
            Server::Ca => "apis-ca.highbond.com",
            Server::Eu => "apis-eu.highbond.com",
            Server::Ap => "apis-ap.highbond.com",
            Server::Au => "apis-au.highbond.com",
            Server::Af => "apis-af.highbond.com",
            Server::Sa => "apis-sa.highbond.com",
            Server::Gov => "apis.highbond-gov.com",
            Server::Gov2 => "apis.highbond-gov2.com",
        }
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host())
    }
}

impl FromStr for Server {
    type Err = anyhow::Error;

    /// Accepts either a region code (`us`, `eu`, ...) or a full hostname.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "us" | "apis-us.highbond.com" => Ok(Server::Us),
            "ca" | "apis-ca.highbond.com" => Ok(Server::Ca),
            "eu" | "apis-eu.highbond.com" => Ok(Server::Eu),
            "ap" | "apis-ap.highbond.com" => Ok(Server::Ap),
            "au" | "apis-au.highbond.com" => Ok(Server::Au),
            "af" | "apis-af.highbond.com" => Ok(Server::Af),
            "sa" | "apis-sa.highbond.com" => Ok(Server::Sa),
            "gov" | "apis.highbond-gov.com" => Ok(Server::Gov),
            "gov2" | "apis.highbond-gov2.com" => Ok(Server::Gov2),
            other => Err(anyhow::anyhow!("Unknown HighBond server: {other}")),
        }
    }
}

/// URL scheme used for API calls. Only test doubles ever use `Http`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Https,
    Http,
}

impl Protocol {
    pub fn scheme(&self) -> &'static str {
        match self {
            Protocol::Https => "https",
            Protocol::Http => "http",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token obtained from the HighBond portal.
    pub token: String,
    /// Organization id, visible in the portal URL after login.
    pub organization_id: String,
    pub server: Server,
    pub protocol: Protocol,
    /// When true, successful requests are logged at info level.
    pub verbose: bool,
}

impl Config {
    pub fn new(token: impl Into<String>, organization_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            organization_id: organization_id.into(),
            server: Server::default(),
            protocol: Protocol::default(),
            verbose: true,
        }
    }

    pub fn with_server(mut self, server: Server) -> Self {
        self.server = server;
        self
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Disable per-request success logging.
    pub fn quiet(mut self) -> Self {
        self.verbose = false;
        self
    }

    /// Load configuration from `HB_TOKEN`, `HB_ORGID` and `HB_SERVER`.
    ///
    /// A `.env` file in the working directory is honored if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let token = std::env::var(ENV_TOKEN)
            .with_context(|| format!("{ENV_TOKEN} is not set"))?;
        let organization_id = std::env::var(ENV_ORG_ID)
            .with_context(|| format!("{ENV_ORG_ID} is not set"))?;

        let server = match std::env::var(ENV_SERVER) {
            Ok(value) => value.parse()?,
            Err(_) => Server::default(),
        };

        Ok(Self::new(token, organization_id).with_server(server))
    }

    /// Base URL for all organization-scoped endpoints.
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}/v1/orgs/{}",
            self.protocol.scheme(),
            self.server.host(),
            self.organization_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_from_region_code() {
        assert_eq!("us".parse::<Server>().unwrap(), Server::Us);
        assert_eq!("EU".parse::<Server>().unwrap(), Server::Eu);
        assert_eq!("gov2".parse::<Server>().unwrap(), Server::Gov2);
    }

    #[test]
    fn test_server_from_hostname() {
        assert_eq!(
            "apis-sa.highbond.com".parse::<Server>().unwrap(),
            Server::Sa
        );
        assert_eq!(
            "apis.highbond-gov.com".parse::<Server>().unwrap(),
            Server::Gov
        );
    }

    #[test]
    fn test_server_unknown_is_error() {
        assert!("apis-xx.highbond.com".parse::<Server>().is_err());
        assert!("".parse::<Server>().is_err());
    }

    #[test]
    fn test_base_url() {
        let config = Config::new("tok", "12345");
        assert_eq!(config.base_url(), "https://apis-us.highbond.com/v1/orgs/12345");

        let config = Config::new("tok", "98765")
            .with_server(Server::Eu)
            .with_protocol(Protocol::Http);
        assert_eq!(config.base_url(), "http://apis-eu.highbond.com/v1/orgs/98765");
    }
}
