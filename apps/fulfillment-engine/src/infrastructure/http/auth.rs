//! Principal extraction.
//!
//! Authentication happens upstream. The gateway forwards the verified
//! account in `x-user-id` and its role in `x-user-role`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::shared::UserId;
use crate::error::ServiceError;

/// Header carrying the authenticated account id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the account role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Account role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Role {
    /// Storefront customer.
    #[default]
    User,
    /// Staff member.
    Admin,
}

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Account id.
    pub user_id: UserId,
    /// Account role.
    pub role: Role,
}

impl Principal {
    /// Returns true for staff accounts.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(ServiceError::unauthenticated)?;

        let role = match parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            Some(r) if r.trim().eq_ignore_ascii_case("admin") => Role::Admin,
            _ => Role::User,
        };

        Ok(Self {
            user_id: UserId::new(user_id),
            role,
        })
    }
}

/// A caller with the admin role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPrincipal(pub Principal);

impl<S> FromRequestParts<S> for AdminPrincipal
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let principal = Principal::from_request_parts(parts, state).await?;
        if !principal.is_admin() {
            tracing::warn!(user_id = %principal.user_id, "Admin route refused");
            return Err(ServiceError::admin_required());
        }
        Ok(Self(principal))
    }
}
