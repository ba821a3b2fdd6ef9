//! Deployment environment and the policies derived from it.
//!
//! The environment is read once at startup (`APP_ENV`) and every policy
//! decision (CORS, CSRF, database transport) is a pure function of it.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Origins allowed to call the application in production.
pub const PROD_CORS_ORIGINS: &[&str] = &["https://kanjigo.app", "https://www.kanjigo.app"];

/// Deployment environment selected by `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnv {
    /// Developer machine: permissive CORS, no CSRF enforcement, TCP database.
    #[default]
    Local,
    /// Deployed service: origin allow-list, enforced CSRF, socket database.
    Prod,
}

/// How the database should be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbTransport {
    /// Direct TCP connection with TLS required.
    Tcp,
    /// Unix-domain socket exposed by a managed database proxy.
    UnixSocket,
}

impl AppEnv {
    pub fn as_str(self) -> &'static str {
        match self {
            AppEnv::Local => "LOCAL",
            AppEnv::Prod => "PROD",
        }
    }

    pub fn is_prod(self) -> bool {
        self == AppEnv::Prod
    }

    /// Whether state-changing requests must carry a valid CSRF token.
    pub fn enforces_csrf(self) -> bool {
        self.is_prod()
    }

    /// Whether the CSRF cookie is marked `Secure` (HTTPS only).
    pub fn secure_cookies(self) -> bool {
        self.is_prod()
    }

    /// Whether CORS accepts any origin.
    pub fn allows_any_origin(self) -> bool {
        !self.is_prod()
    }

    pub fn db_transport(self) -> DbTransport {
        match self {
            AppEnv::Local => DbTransport::Tcp,
            AppEnv::Prod => DbTransport::UnixSocket,
        }
    }
}

impl FromStr for AppEnv {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOCAL" => Ok(AppEnv::Local),
            "PROD" => Ok(AppEnv::Prod),
            other => Err(CoreError::Validation(format!(
                "Unknown APP_ENV '{other}'. Must be LOCAL or PROD"
            ))),
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_values_case_insensitively() {
        assert_eq!("LOCAL".parse::<AppEnv>().unwrap(), AppEnv::Local);
        assert_eq!("prod".parse::<AppEnv>().unwrap(), AppEnv::Prod);
        assert_eq!(" Prod ".parse::<AppEnv>().unwrap(), AppEnv::Prod);
    }

    #[test]
    fn rejects_unknown_value() {
        assert!("staging".parse::<AppEnv>().is_err());
    }

    #[test]
    fn local_policy_is_permissive() {
        let env = AppEnv::Local;
        assert!(!env.enforces_csrf());
        assert!(!env.secure_cookies());
        assert!(env.allows_any_origin());
        assert_eq!(env.db_transport(), DbTransport::Tcp);
    }

    #[test]
    fn prod_policy_is_strict() {
        let env = AppEnv::Prod;
        assert!(env.enforces_csrf());
        assert!(env.secure_cookies());
        assert!(!env.allows_any_origin());
        assert_eq!(env.db_transport(), DbTransport::UnixSocket);
    }

    #[test]
    fn prod_allow_list_has_two_origins() {
        assert_eq!(PROD_CORS_ORIGINS.len(), 2);
        assert!(PROD_CORS_ORIGINS.iter().all(|o| o.starts_with("https://")));
    }
}
