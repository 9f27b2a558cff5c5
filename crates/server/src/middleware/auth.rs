//! Caller identity extractors.
//!
//! Identity arrives in trusted headers set by the deployment's auth
//! gateway; the server does not verify credentials itself. Role checks are
//! per-route extractors rather than a single shared admin key, so staff
//! endpoints and admin endpoints can require different roles.
//!
//! Headers:
//!
//! - `x-account-id`     - numeric account ID for signed-in customers
//! - `x-customer-name`  - display name for guests
//! - `x-role`           - `customer`, `staff`, `admin` or `super_admin`

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};

use mensa_core::{AccountId, AccountRole, CustomerRef};

use crate::error::AppError;

const ACCOUNT_ID_HEADER: &str = "x-account-id";
const CUSTOMER_NAME_HEADER: &str = "x-customer-name";
const ROLE_HEADER: &str = "x-role";

/// The identity a request carries. Every field is optional; a request with
/// none of the headers is an anonymous guest.
#[derive(Debug, Clone, Default)]
pub struct Requester {
    /// Signed-in account, if any.
    pub account_id: Option<AccountId>,
    /// Guest display name, if any.
    pub customer_name: Option<String>,
    /// Asserted role; absent means plain customer.
    pub role: Option<AccountRole>,
}

impl Requester {
    /// The customer reference orders placed by this requester carry.
    /// Accounts win over guest names when both are present.
    #[must_use]
    pub fn customer_ref(&self) -> Option<CustomerRef> {
        if let Some(id) = self.account_id {
            return Some(CustomerRef::Account(id));
        }
        self.customer_name.clone().map(CustomerRef::Guest)
    }

    fn is_staff(&self) -> bool {
        self.role.is_some_and(AccountRole::is_staff)
    }

    fn is_admin(&self) -> bool {
        self.role.is_some_and(AccountRole::is_admin)
    }
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|value| value.to_str().ok())
}

impl<S> FromRequestParts<S> for Requester
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let account_id = match header_str(parts, ACCOUNT_ID_HEADER) {
            Some(raw) => Some(
                raw.parse::<i32>()
                    .map(AccountId::new)
                    .map_err(|_| AppError::BadRequest("invalid x-account-id header".to_owned()))?,
            ),
            None => None,
        };
        let role = match header_str(parts, ROLE_HEADER) {
            Some(raw) => Some(
                raw.parse::<AccountRole>()
                    .map_err(|_| AppError::BadRequest("invalid x-role header".to_owned()))?,
            ),
            None => None,
        };

        Ok(Self {
            account_id,
            customer_name: header_str(parts, CUSTOMER_NAME_HEADER).map(str::to_owned),
            role,
        })
    }
}

/// Extractor that requires a staff-or-above role.
pub struct RequireStaff(pub Requester);

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let requester = Requester::from_request_parts(parts, state).await?;
        if !requester.is_staff() {
            return Err(AppError::Forbidden);
        }
        Ok(Self(requester))
    }
}

/// Extractor that requires an admin-or-above role.
pub struct RequireAdmin(pub Requester);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let requester = Requester::from_request_parts(parts, state).await?;
        if !requester.is_admin() {
            return Err(AppError::Forbidden);
        }
        Ok(Self(requester))
    }
}
