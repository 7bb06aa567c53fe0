use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::RwLock;
use uuid::Uuid;

use super::api_key::{credential_suffix, Role};
use crate::config::AuthConfig;

/// A key known to the admin listing.
#[derive(Debug, Clone)]
struct KeyRecord {
    key: String,
    role: Role,
    created: DateTime<Utc>,
    last_used: Option<DateTime<Utc>>,
    request_count: u64,
}

/// Key information safe to return to admins (no full key).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KeySummary {
    pub key_id: String,
    #[serde(rename = "type")]
    pub role: &'static str,
    pub created: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
    pub request_count: u64,
}

/// A freshly issued key, returned to the caller exactly once.
#[derive(Debug, Clone)]
pub struct IssuedKey {
    pub key: String,
    pub role: Role,
    pub created: DateTime<Utc>,
}

impl IssuedKey {
    pub fn key_id(&self) -> &str {
        credential_suffix(&self.key)
    }
}

/// In-memory registry behind `/api/admin/keys`.
///
/// Seeded with the configured secrets. Issued keys are listed here only; the
/// key validator accepts nothing but the two configured secrets.
pub struct KeyRegistry {
    records: RwLock<Vec<KeyRecord>>,
}

impl KeyRegistry {
    pub fn new(auth: &AuthConfig) -> Self {
        let now = Utc::now();
        let seeded = [(auth.user_secret(), Role::User), (auth.admin_secret(), Role::Admin)];
        let records = seeded
            .into_iter()
            .filter_map(|(secret, role)| {
                secret.map(|key| KeyRecord {
                    key: key.to_string(),
                    role,
                    created: now,
                    last_used: None,
                    request_count: 0,
                })
            })
            .collect();

        Self { records: RwLock::new(records) }
    }

    /// Sanitized view of every known key, in insertion order.
    pub fn list(&self) -> Vec<KeySummary> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        records
            .iter()
            .map(|r| KeySummary {
                key_id: credential_suffix(&r.key).to_string(),
                role: r.role.as_str(),
                created: r.created,
                last_used: r.last_used,
                request_count: r.request_count,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record a request made with `credential` under `role` (no-op for unknown keys).
    pub fn record_use(&self, credential: &str, role: Role) {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        if let Some(record) = records.iter_mut().find(|r| r.role == role && r.key == credential) {
            record.request_count = record.request_count.saturating_add(1);
            record.last_used = Some(Utc::now());
        }
    }

    /// Generate and register a new key of the given role.
    pub fn issue(&self, role: Role) -> IssuedKey {
        let key = format!("cs_{}_{}", role, Uuid::new_v4().simple());
        let created = Utc::now();

        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        records.push(KeyRecord {
            key: key.clone(),
            role,
            created,
            last_used: None,
            request_count: 0,
        });

        IssuedKey { key, role, created }
    }
}
