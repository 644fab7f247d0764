//! Configuration for the digest mailer.
//!
//! Everything is resolved once when the config is built. [`NotifierConfig::from_lookup`]
//! is a pure function of a variable lookup so resolution can be tested
//! without touching the process environment; [`NotifierConfig::from_env`]
//! is the same rules applied to `std::env`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::EmailerError;

/// Default SMTP host.
pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";

/// Default SMTP port (submission, STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

pub const ENV_SMTP_PASSWORD: &str = "SMTP_PASSWORD";
pub const ENV_SMTP_EMAIL: &str = "SMTP_EMAIL";
pub const ENV_SMTP_SERVER: &str = "SMTP_SERVER";
pub const ENV_SMTP_PORT: &str = "SMTP_PORT";
pub const ENV_SMTP_SECURITY: &str = "SMTP_SECURITY";

/// Deprecated, read only when `SMTP_PASSWORD` is unset.
pub const ENV_GMAIL_PASSWORD: &str = "GMAIL_PASSWORD";
/// Deprecated, read only when `SMTP_EMAIL` is unset.
pub const ENV_GMAIL_EMAIL: &str = "GMAIL_EMAIL";

/// Body format of the digest. Selects both the render branch and the
/// `Content-Type` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Html,
    Plain,
}

impl ContentType {
    /// MIME type string, without parameters.
    #[must_use]
    pub const fn as_mime(&self) -> &'static str {
        match self {
            Self::Html => "text/html",
            Self::Plain => "text/plain",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}

impl FromStr for ContentType {
    type Err = EmailerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text/html" | "html" => Ok(Self::Html),
            "text/plain" | "plain" | "text" => Ok(Self::Plain),
            _ => Err(EmailerError::InvalidContentType(s.to_string())),
        }
    }
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransportSecurity {
    /// Plain connect, then upgrade with STARTTLS (port 587).
    #[default]
    StartTls,
    /// TLS from the first byte (SMTPS, port 465).
    Tls,
    /// No encryption. Only for local relays and mail catchers.
    None,
}

impl FromStr for TransportSecurity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "starttls" => Ok(Self::StartTls),
            "tls" | "smtps" => Ok(Self::Tls),
            "none" | "plain" => Ok(Self::None),
            other => Err(format!(
                "{other} is not a supported SMTP security mode. Use 'starttls', 'tls' or 'none'."
            )),
        }
    }
}

impl TransportSecurity {
    /// Port this mode is normally served on.
    #[must_use]
    pub const fn conventional_port(&self) -> u16 {
        match self {
            Self::StartTls => 587,
            Self::Tls => 465,
            Self::None => 25,
        }
    }
}

/// Resolved mailer configuration. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    content_type: ContentType,
    server: String,
    port: u16,
    email: String,
    password: String,
    security: TransportSecurity,
}

impl NotifierConfig {
    /// Resolve configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset. Credential and sender address prefer
    /// `SMTP_*` and fall back to the deprecated `GMAIL_*` names; the server
    /// defaults to [`DEFAULT_SMTP_SERVER`]; a missing or unparsable port
    /// falls back to [`DEFAULT_SMTP_PORT`] with a warning. Nothing here
    /// fails: an empty credential only shows up as an auth error at send
    /// time.
    pub fn from_lookup<F>(content_type: ContentType, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let password = with_legacy_fallback(&get, ENV_SMTP_PASSWORD, ENV_GMAIL_PASSWORD);
        let email = with_legacy_fallback(&get, ENV_SMTP_EMAIL, ENV_GMAIL_EMAIL);
        let server = get(ENV_SMTP_SERVER).unwrap_or_else(|| DEFAULT_SMTP_SERVER.to_string());

        let raw_port = get(ENV_SMTP_PORT).unwrap_or_default();
        let port = match raw_port.parse::<u16>() {
            Ok(port) => port,
            Err(e) => {
                warn!(
                    value = %raw_port,
                    error = %e,
                    default = DEFAULT_SMTP_PORT,
                    "Invalid or missing SMTP_PORT, using default port"
                );
                DEFAULT_SMTP_PORT
            }
        };

        let security = match get(ENV_SMTP_SECURITY) {
            Some(raw) => raw.parse::<TransportSecurity>().unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to STARTTLS");
                TransportSecurity::default()
            }),
            None => TransportSecurity::default(),
        };

        let config = Self {
            content_type,
            server,
            port,
            email,
            password,
            security,
        };
        if !config.port_matches_security() {
            warn!(
                port = config.port,
                expected = security.conventional_port(),
                "Implicit TLS on the STARTTLS submission port; set SMTP_PORT (usually 465)"
            );
        }
        debug!(?config, "Resolved SMTP configuration");
        config
    }

    /// Resolve configuration from a map of variables.
    pub fn from_vars(content_type: ContentType, vars: &HashMap<String, String>) -> Self {
        Self::from_lookup(content_type, |key| vars.get(key).cloned())
    }

    /// Resolve configuration from the process environment.
    pub fn from_env(content_type: ContentType) -> Self {
        Self::from_lookup(content_type, |key| std::env::var(key).ok())
    }

    #[must_use]
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_security(mut self, security: TransportSecurity) -> Self {
        self.security = security;
        self
    }

    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        self.content_type
    }

    #[must_use]
    pub fn server(&self) -> &str {
        &self.server
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Sender address, also used as the SMTP username.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    #[must_use]
    pub const fn security(&self) -> TransportSecurity {
        self.security
    }

    /// False when implicit TLS is pointed at the submission port, which
    /// only speaks STARTTLS. `SMTP_SECURITY=tls` without `SMTP_PORT` ends
    /// up here because the port default is 587 regardless of mode.
    #[must_use]
    pub const fn port_matches_security(&self) -> bool {
        !matches!(self.security, TransportSecurity::Tls) || self.port != DEFAULT_SMTP_PORT
    }
}

impl fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifierConfig")
            .field("content_type", &self.content_type)
            .field("server", &self.server)
            .field("port", &self.port)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("security", &self.security)
            .finish()
    }
}

// TODO: drop the GMAIL_* fallback once deployments have moved to SMTP_*.
fn with_legacy_fallback<G>(get: &G, primary: &str, legacy: &str) -> String
where
    G: Fn(&str) -> Option<String>,
{
    if let Some(value) = get(primary) {
        return value;
    }
    match get(legacy) {
        Some(value) => {
            warn!(variable = legacy, replacement = primary, "Deprecated variable in use");
            value
        }
        None => String::new(),
    }
}
