use crate::{auth::issue_token, error::AppError};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::Value;

/// Mint a bearer token
///
/// Signs whatever claims object the client submits and returns the token as
/// a bare JSON string. No credential check happens here: the client proves
/// its identity upstream and posts the resulting profile, which becomes the
/// claims payload. Expiry is stamped server-side.
#[post("/jwt")]
pub async fn mint_token(body: web::Json<Value>) -> Result<impl Responder, AppError> {
    let token = issue_token(body.into_inner())?;
    Ok(HttpResponse::Ok().json(token))
}
