// src/config.rs
use anyhow::{Context, Result};
use log::warn;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::models::Locale;

const DEFAULT_PORT: u16 = 3030;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: IpAddr,
    pub port: u16,
    pub default_locale: Locale,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            default_locale: Locale::default(),
        }
    }
}

impl Settings {
    /// Reads `HOST`, `PORT` and `CALCULATOR_LOCALE`, falling back to the defaults
    /// for anything unset. Set but unparsable values are errors.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let host = match lookup("HOST") {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .with_context(|| format!("HOST must be an IP address, got '{}'", raw))?,
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a number, got '{}'", raw))?,
            None => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                defaults.port
            }
        };

        let default_locale = match lookup("CALCULATOR_LOCALE") {
            Some(raw) => raw
                .parse::<Locale>()
                .map_err(anyhow::Error::msg)
                .context("Parsing CALCULATOR_LOCALE")?,
            None => defaults.default_locale,
        };

        Ok(Settings {
            host,
            port,
            default_locale,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
