use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// Extracts the verified token claims from request extensions.
///
/// Intended for routes wrapped in a [`Guard`](crate::auth::guard::Guard):
/// the gate chain verifies the token and inserts the decoded [`Claims`]
/// into the request extensions once every gate has passed.
///
/// If no claims are present (the guard did not run, or a route was left
/// unwrapped by mistake), the extractor rejects with `401 Unauthorized`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError; // AppError converts into ActixError via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(AuthenticatedUser(claims))),
            None => {
                let err = AppError::Unauthorized(
                    "No verified identity on request. Ensure the route is guarded.".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
