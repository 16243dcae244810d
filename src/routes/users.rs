use crate::{
    auth::{AuthenticatedUser, Guard},
    error::AppError,
    models::{RegisterUser, RoleChange, RoleCount, User, UserSearchQuery, UserUpdate},
};
use actix_web::{get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Register a new user
///
/// Public endpoint. Registration is idempotent on email: a duplicate call
/// answers 200 without inserting a second record, a fresh email answers 201
/// with the new identifier.
#[post("/users")]
pub async fn register(
    pool: web::Data<PgPool>,
    user_data: web::Json<RegisterUser>,
) -> Result<impl Responder, AppError> {
    // Validate input
    user_data.validate()?;
    let user = user_data.into_inner();

    // The unique index on email makes the insert itself the existence check,
    // so two concurrent registrations cannot both insert.
    let id = Uuid::new_v4();
    let result = sqlx::query(
        "INSERT INTO users (id, image, name, email, role) VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(id)
    .bind(&user.image)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.role)
    .execute(&**pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::Ok().body("User found"));
    }

    log::info!("A user was successfully inserted with id: {}", id);
    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "User Insertion successful",
        "insertedId": id,
    })))
}

/// Builds the user listing query from the allow-listed parameters.
///
/// Returns the SQL, the text values to bind in placeholder order, and the
/// row limit (`None` when the result set is unbounded). Filter values only
/// ever travel as binds; sort field and direction are mapped through fixed
/// sets, so no caller input is ever spliced into the SQL text.
#[allow(unused_assignments)]
fn build_user_search(
    params: &UserSearchQuery,
) -> Result<(String, Vec<String>, Option<i64>), AppError> {
    let mut sql = String::from("SELECT id, image, name, email, role FROM users");
    let mut param_count = 1;

    let mut conditions: Vec<String> = Vec::new();
    let mut binds: Vec<String> = Vec::new();

    if let Some(name) = &params.name {
        conditions.push(format!("name = ${}", param_count));
        binds.push(name.clone());
        param_count += 1;
    }
    if let Some(email) = &params.email {
        conditions.push(format!("email = ${}", param_count));
        binds.push(email.clone());
        param_count += 1;
    }
    if let Some(role) = &params.role {
        conditions.push(format!("role = ${}", param_count));
        binds.push(role.clone());
        param_count += 1;
    }
    if let Some(search) = &params.search {
        // Case-insensitive substring match over the indexed profile fields.
        conditions.push(format!(
            "(name ILIKE ${} OR email ILIKE ${} OR role ILIKE ${})",
            param_count,
            param_count + 1,
            param_count + 2
        ));
        let pattern = format!("%{}%", search);
        binds.push(pattern.clone());
        binds.push(pattern.clone());
        binds.push(pattern);
        param_count += 3;
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    if let Some(sort) = params.sort.as_deref() {
        let column = match sort {
            "name" | "email" | "role" => sort,
            other => {
                return Err(AppError::BadRequest(format!(
                    "Unsupported sort field: {}",
                    other
                )))
            }
        };
        let direction = match params.order.as_deref() {
            None | Some("asc") => "ASC",
            Some("desc") => "DESC",
            Some(other) => {
                return Err(AppError::BadRequest(format!(
                    "Unsupported sort order: {}",
                    other
                )))
            }
        };
        sql.push_str(&format!(" ORDER BY {} {}", column, direction));
    } else if let Some(order) = params.order.as_deref() {
        // Nothing to apply it to, but an unknown value is still rejected.
        if order != "asc" && order != "desc" {
            return Err(AppError::BadRequest(format!(
                "Unsupported sort order: {}",
                order
            )));
        }
    }

    let limit = match params.limit {
        // Zero keeps the store's "no limit" meaning.
        None | Some(0) => None,
        Some(n) if n < 0 => {
            return Err(AppError::BadRequest("limit must not be negative".into()))
        }
        Some(n) => {
            sql.push_str(&format!(" LIMIT ${}", param_count));
            param_count += 1;
            Some(n)
        }
    };

    Ok((sql, binds, limit))
}

/// List users (admin only)
///
/// ## Query Parameters:
/// - `search` (optional): case-insensitive substring matched against name, email and role.
/// - `name`, `email`, `role` (optional): exact-match filters.
/// - `limit` (optional): maximum rows to return; `0` (the default) means no limit.
/// - `sort` (optional): one of `name`, `email`, `role`.
/// - `order` (optional): `asc` (default) or `desc`.
///
/// ## Responses:
/// - `200 OK`: JSON array of matching users.
/// - `400 Bad Request`: a parameter outside the allowed values.
/// - `401 / 403`: from the admin gate chain.
/// - `500 Internal Server Error`: store failure.
#[get("/users", wrap = "Guard::admin()")]
pub async fn list_users(
    pool: web::Data<PgPool>,
    query_params: web::Query<UserSearchQuery>,
) -> Result<impl Responder, AppError> {
    let (sql, binds, limit) = build_user_search(&query_params)?;

    let mut query = sqlx::query_as::<_, User>(&sql);
    for value in &binds {
        query = query.bind(value);
    }
    if let Some(limit) = limit {
        query = query.bind(limit);
    }

    let users = query.fetch_all(&**pool).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Fetch a single user by email
///
/// A missing record is not an error; the client receives JSON `null`.
#[get("/users/{email}", wrap = "Guard::authenticated()")]
pub async fn get_user(
    pool: web::Data<PgPool>,
    email: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let user =
        sqlx::query_as::<_, User>("SELECT id, image, name, email, role FROM users WHERE email = $1")
            .bind(email.into_inner())
            .fetch_optional(&**pool)
            .await?;

    Ok(HttpResponse::Ok().json(user))
}

/// Update the caller's own profile
///
/// Partial overwrite of the updatable fields. The record is keyed by the
/// verified token identity, not by the path segment, so a caller can only
/// ever modify its own profile.
#[put("/users/{email}", wrap = "Guard::registered()")]
pub async fn update_user(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    _email: web::Path<String>,
    update: web::Json<UserUpdate>,
) -> Result<impl Responder, AppError> {
    let update = update.into_inner();
    if update.is_empty() {
        return Err(AppError::BadRequest(
            "No updatable fields in request body".into(),
        ));
    }

    let mut sets: Vec<String> = Vec::new();
    let mut binds: Vec<String> = Vec::new();
    let mut param_count = 1;

    if let Some(image) = &update.image {
        sets.push(format!("image = ${}", param_count));
        binds.push(image.clone());
        param_count += 1;
    }
    if let Some(name) = &update.name {
        sets.push(format!("name = ${}", param_count));
        binds.push(name.clone());
        param_count += 1;
    }
    if let Some(role) = &update.role {
        sets.push(format!("role = ${}", param_count));
        binds.push(role.clone());
        param_count += 1;
    }

    let sql = format!(
        "UPDATE users SET {} WHERE email = ${}",
        sets.join(", "),
        param_count
    );

    let mut query = sqlx::query(&sql);
    for value in &binds {
        query = query.bind(value);
    }
    query = query.bind(&user.0.email);

    let result = query.execute(&**pool).await?;
    Ok(HttpResponse::Ok().body(format!("{} user updated.", result.rows_affected())))
}

/// Change a user's role by id (admin only)
#[put("/changeUserRole/{id}", wrap = "Guard::admin()")]
pub async fn change_role(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
    change: web::Json<RoleChange>,
) -> Result<impl Responder, AppError> {
    change.validate()?;

    let result = sqlx::query("UPDATE users SET role = $1 WHERE id = $2")
        .bind(&change.role)
        .bind(user_id.into_inner())
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().body(format!("{} user's role updated", result.rows_affected())))
}

/// Per-role user counts (admin only)
///
/// Groups all users by role and reshapes the result into `{name, value}`
/// pairs, alongside the total number of users.
#[get("/userRole-counts", wrap = "Guard::admin()")]
pub async fn role_counts(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let counts = sqlx::query_as::<_, RoleCount>(
        "SELECT role AS name, COUNT(*) AS value FROM users GROUP BY role",
    )
    .fetch_all(&**pool)
    .await?;

    let total_users: i64 = counts.iter().map(|count| count.value).sum();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "roleCounts": counts,
        "totalUsers": total_users,
    })))
}
