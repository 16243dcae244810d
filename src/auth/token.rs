use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Token lifetime. Clients re-login after three days.
const TOKEN_TTL_DAYS: i64 = 3;

/// The claims the access control chain consumes, decoded from a verified
/// token.
///
/// Issuance signs whatever object the caller supplied; any fields beyond
/// these ride along signed but undecoded. `email` is the identity the chain
/// reasons about and must be present for verification to succeed.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Identity the token was issued for.
    pub email: String,
    /// Role carried at issuance time, if any. The admin gate reads this,
    /// never the caller-supplied `role` header.
    pub role: Option<String>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Signs the given claims payload into a bearer token.
///
/// The payload must be a JSON object; its shape is otherwise not validated.
/// `exp` (now + 3 days) and `iat` are stamped into the signed object,
/// replacing any caller-supplied copies. Signing uses the process-wide
/// `JWT_SECRET`.
///
/// # Errors
/// `AppError::BadRequest` for non-object payloads,
/// `AppError::InternalServerError` if `JWT_SECRET` is unset or encoding fails.
pub fn issue_token(payload: Value) -> Result<String, AppError> {
    let mut claims = match payload {
        Value::Object(map) => map,
        _ => {
            return Err(AppError::BadRequest(
                "claims payload must be a JSON object".into(),
            ))
        }
    };

    let now = chrono::Utc::now();
    let expiration = now
        .checked_add_signed(chrono::Duration::days(TOKEN_TTL_DAYS))
        .expect("valid timestamp")
        .timestamp();
    claims.insert("exp".to_string(), json!(expiration));
    claims.insert("iat".to_string(), json!(now.timestamp()));

    let secret = match std::env::var("JWT_SECRET") {
        Ok(val) => val,
        Err(_) => return Err(AppError::InternalServerError("JWT_SECRET not set".into())),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to issue token: {}", e)))
}

/// Verifies a bearer token and decodes the claims the chain needs.
///
/// Signature and expiry are checked with `jsonwebtoken`'s default validation.
/// Every failure mode (malformed token, bad signature, expired, missing
/// `email`) is reported uniformly as `AppError::Unauthorized`; callers do not
/// distinguish them.
pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    let secret = match std::env::var("JWT_SECRET") {
        Ok(val) => val,
        Err(_) => return Err(AppError::InternalServerError("JWT_SECRET not set".into())),
    };
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}
