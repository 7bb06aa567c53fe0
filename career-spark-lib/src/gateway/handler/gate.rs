use http::HeaderMap;
use tracing::debug;

use crate::gateway::http_result::{HttpError, HttpResult};
use crate::gateway::AppState;
use crate::security::{extract_credential, AuthorizationResult, RateLimitOutcome, Role};
use crate::telemetry::metrics::values;

/// Privilege a route requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any valid credential; failures are 401
    Authenticated,
    /// Admin credential only; failures (including user credentials) are 403
    AdminOnly,
}

/// A request that passed both the key validator and the rate limiter
#[derive(Debug, Clone)]
pub struct Admission {
    pub auth: AuthorizationResult,
    pub role: Role,
    pub outcome: RateLimitOutcome,
}

/// Run the key validator and the rate limiter for one request.
///
/// `limit_for` picks the route's limit for the validated role.
///
/// Returns:
/// - `Ok(Admission)` if the request may proceed
/// - `Err(Unauthenticated | Forbidden)` if the credential is rejected
/// - `Err(RateLimited)` if the partition's window is exhausted
pub fn check_access<F>(
    state: &AppState,
    headers: &HeaderMap,
    query: Option<&str>,
    route: &str,
    access: Access,
    limit_for: F,
) -> HttpResult<Admission>
where
    F: FnOnce(Role) -> u32,
{
    let credential = extract_credential(headers, query);
    let auth = state.validator.validate(credential.as_deref());

    let role = match (auth.role, access) {
        (Some(Role::Admin), _) => Role::Admin,
        (Some(Role::User), Access::Authenticated) => Role::User,
        (Some(Role::User), Access::AdminOnly) | (None, Access::AdminOnly) => {
            debug!(route, partition = %auth.partition_key, "admin access denied");
            record_auth_failure(state, values::REASON_FORBIDDEN, route);
            return Err(HttpError::Forbidden);
        }
        (None, Access::Authenticated) => {
            debug!(route, "missing or invalid API key");
            record_auth_failure(state, values::REASON_UNAUTHENTICATED, route);
            return Err(HttpError::Unauthenticated);
        }
    };

    let limit = limit_for(role);
    let outcome = state.limiter.check_and_consume(&auth.partition_key, limit);

    if outcome.is_limited() {
        debug!(route, partition = %auth.partition_key, limit, "rate limit exceeded");
        if let Some(m) = &state.metrics {
            m.record_rate_limit_rejection(route, role.as_str());
        }
        return Err(HttpError::RateLimited(outcome));
    }

    debug!(
        route,
        partition = %auth.partition_key,
        limit,
        remaining = outcome.remaining(),
        "rate limit check passed"
    );
    if let Some(m) = &state.metrics {
        m.record_rate_limit_allowed(route, role.as_str());
    }
    if let Some(credential) = credential.as_deref() {
        state.registry.record_use(credential, role);
    }

    Ok(Admission { auth, role, outcome })
}

fn record_auth_failure(state: &AppState, reason: &str, route: &str) {
    if let Some(m) = &state.metrics {
        m.record_auth_failure(reason, route);
    }
}
