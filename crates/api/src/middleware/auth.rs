//! # Actor extraction
//!
//! Authentication happens upstream: the shelter's gateway verifies the caller
//! and forwards who they are in two headers. This module turns those headers
//! into an [`Actor`] for handlers. Anything missing or malformed is rejected
//! with `401 Unauthorized` before a handler runs.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use shelterwalk_core::{
    errors::WalkError,
    models::actor::{Actor, ActorRole},
};
use uuid::Uuid;

use super::error_handling::AppError;

pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// The authenticated caller of the current request.
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        actor_from_headers(&parts.headers).map(CurrentActor)
    }
}

pub fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, AppError> {
    let id = header_str(headers, ACTOR_ID_HEADER)?;
    let id = Uuid::parse_str(id.trim()).map_err(|_| {
        WalkError::Unauthenticated(format!("{} is not a valid UUID", ACTOR_ID_HEADER))
    })?;
    let role: ActorRole = header_str(headers, ACTOR_ROLE_HEADER)?.parse()?;

    Ok(Actor::new(id, role))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, AppError> {
    let value = headers
        .get(name)
        .ok_or_else(|| WalkError::Unauthenticated(format!("Missing {} header", name)))?;
    Ok(value
        .to_str()
        .map_err(|_| WalkError::Unauthenticated(format!("Unreadable {} header", name)))?)
}
