use crate::{
    auth::{AuthenticatedUser, Guard},
    error::AppError,
    models::TaskRecord,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::{Map, Value};
use sqlx::{types::Json, PgPool};

/// Create a task
///
/// Accepts any JSON object as the task body; the shape is owned by the
/// client. The server stamps `status` and `lastUpdate` (caller-supplied
/// copies of those fields are discarded) and stores the rest untouched.
///
/// ## Responses:
/// - `201 Created`: plain-text confirmation.
/// - `400 Bad Request`: body is not a JSON object.
/// - `401 / 403`: from the gate chain.
/// - `500 Internal Server Error`: store failure.
#[post("/tasks", wrap = "Guard::registered()")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    body: web::Json<Map<String, Value>>,
    submitter: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let record = TaskRecord::stamped(body.into_inner());

    sqlx::query("INSERT INTO tasks (id, details, status, last_update) VALUES ($1, $2, $3, $4)")
        .bind(record.id)
        .bind(Json(&record.details))
        .bind(&record.status)
        .bind(record.last_update)
        .execute(&**pool)
        .await?;

    log::info!("Task {} added by {}", record.id, submitter.0.email);
    Ok(HttpResponse::Created().body("Task was added"))
}
