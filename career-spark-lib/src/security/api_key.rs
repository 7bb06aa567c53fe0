//! API key validation.
//!
//! A credential is compared against the two configured secrets and mapped to a
//! [`Role`] plus a partition key used to scope rate-limit counters.

use std::fmt;

use http::HeaderMap;
use secrecy::{ExposeSecret, Secret};

use crate::config::AuthConfig;

/// Header carrying the credential
pub const API_KEY_HEADER: &str = "x-api-key";
/// Query parameter carrying the credential when the header is absent
pub const API_KEY_QUERY_PARAM: &str = "api_key";

/// Number of trailing credential characters kept in partition keys
const PARTITION_SUFFIX_CHARS: usize = 8;

/// Authorization level derived from a credential match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of validating one credential.
///
/// Computed fresh for every request; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationResult {
    pub valid: bool,
    pub role: Option<Role>,
    /// `"{role}:{last 8 characters of credential}"`, empty when invalid
    pub partition_key: String,
}

impl AuthorizationResult {
    pub fn invalid() -> Self {
        Self { valid: false, role: None, partition_key: String::new() }
    }

    fn granted(role: Role, credential: &str) -> Self {
        Self { valid: true, role: Some(role), partition_key: partition_key(role, credential) }
    }

    pub fn is_admin(&self) -> bool {
        self.valid && self.role == Some(Role::Admin)
    }
}

/// Classifies credentials against the configured admin and user secrets.
pub struct KeyValidator {
    admin_secret: Option<Secret<String>>,
    user_secret: Option<Secret<String>>,
}

impl KeyValidator {
    pub fn new(admin_secret: Option<&str>, user_secret: Option<&str>) -> Self {
        Self {
            admin_secret: admin_secret.map(|s| Secret::new(s.to_string())),
            user_secret: user_secret.map(|s| Secret::new(s.to_string())),
        }
    }

    pub fn from_config(auth: &AuthConfig) -> Self {
        Self::new(auth.admin_secret(), auth.user_secret())
    }

    /// Validate a credential.
    ///
    /// The admin secret is checked before the user secret, so a credential
    /// equal to both resolves to [`Role::Admin`]. Absence and mismatch are
    /// normal outcomes, never errors.
    pub fn validate(&self, credential: Option<&str>) -> AuthorizationResult {
        let credential = match credential {
            Some(c) if !c.is_empty() => c,
            _ => return AuthorizationResult::invalid(),
        };

        if matches_secret(self.admin_secret.as_ref(), credential) {
            return AuthorizationResult::granted(Role::Admin, credential);
        }
        if matches_secret(self.user_secret.as_ref(), credential) {
            return AuthorizationResult::granted(Role::User, credential);
        }

        AuthorizationResult::invalid()
    }

    /// Role a credential would be granted, if any
    pub fn role_of(&self, credential: &str) -> Option<Role> {
        self.validate(Some(credential)).role
    }
}

fn matches_secret(secret: Option<&Secret<String>>, credential: &str) -> bool {
    secret.is_some_and(|s| s.expose_secret() == credential)
}

/// Build the rate-limit partition key for a role and credential.
pub fn partition_key(role: Role, credential: &str) -> String {
    format!("{}:{}", role, credential_suffix(credential))
}

/// Last eight characters of a credential (the whole credential when shorter).
pub fn credential_suffix(credential: &str) -> &str {
    let start = credential
        .char_indices()
        .rev()
        .nth(PARTITION_SUFFIX_CHARS - 1)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    &credential[start..]
}

/// Extract the credential from the `x-api-key` header, falling back to the
/// `api_key` query parameter.
///
/// Empty or non-ASCII-visible header values count as absent.
pub fn extract_credential(headers: &HeaderMap, query: Option<&str>) -> Option<String> {
    if let Some(value) = headers.get(API_KEY_HEADER) {
        if let Ok(value_str) = value.to_str() {
            if !value_str.is_empty() {
                return Some(value_str.to_string());
            }
        }
    }

    query_param(query?, API_KEY_QUERY_PARAM).filter(|v| !v.is_empty())
}

/// First value of `name` in a raw query string, percent-decoded.
pub fn query_param(query: &str, name: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
