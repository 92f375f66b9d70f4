//! User CRUD API handlers.
//!
//! ```text
//! GET    /api/user          list every record
//! GET    /api/user/{id}     fetch one record
//! POST   /api/user          create a record
//! PUT    /api/user/{id}     replace a record
//! DELETE /api/user/{id}     remove a record
//! ```
//!
//! Each handler is a thin adapter: parse input, call the persistence
//! gateway, pick a status code. No other business logic lives here.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::UserPersistenceError;
use crate::domain::{Error, User, UserDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_email, parse_person_name, parse_user_id,
};

const FIRST_NAME: FieldName = FieldName::new("firstName");
const LAST_NAME: FieldName = FieldName::new("lastName");
const EMAIL: FieldName = FieldName::new("email");
const ID: FieldName = FieldName::new("id");

/// Write payload for `POST /api/user` and `PUT /api/user/{id}`.
///
/// The record id is never accepted in a write body. Unknown fields are
/// rejected, so a client-supplied `id` fails with a 400 rather than being
/// silently dropped.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPayload {
    /// Given name; must be non-empty.
    #[schema(example = "Ada")]
    pub first_name: String,
    /// Family name; must be non-empty.
    #[schema(example = "Lovelace")]
    pub last_name: String,
    /// Email address; must match `local@domain.tld`.
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// Validate a write payload field by field, before any persistence call.
fn draft_from_payload(payload: UserPayload) -> Result<UserDraft, Error> {
    let UserPayload {
        first_name,
        last_name,
        email,
    } = payload;

    let first_name = parse_person_name(first_name, FIRST_NAME)?;
    let last_name = parse_person_name(last_name, LAST_NAME)?;
    let email = parse_email(email, EMAIL)?;
    Ok(UserDraft::new(first_name, last_name, email))
}

fn not_found() -> Error {
    Error::not_found("no user record matches the requested id")
}

/// Translate gateway failures into the domain error envelope.
///
/// `Conflict` is deliberately fatal here; only the update handler gives it
/// the existence recheck.
fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::NotFound => not_found(),
        UserPersistenceError::Conflict { message } => Error::internal(message),
    }
}

/// List every stored user record.
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Every stored user record", body = [User]),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state
        .users
        .list_all()
        .await
        .map_err(map_persistence_error)?;
    Ok(web::Json(users))
}

/// Fetch a single user record by id.
#[utoipa::path(
    get,
    path = "/api/user/{id}",
    params(("id" = String, Path, description = "User record id")),
    responses(
        (status = 200, description = "The matching user record", body = User),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "No record matches the id"),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path.into_inner(), ID)?;

    match state
        .users
        .find_by_id(&id)
        .await
        .map_err(map_persistence_error)?
    {
        Some(user) => Ok(web::Json(user)),
        None => Err(not_found()),
    }
}

/// Create a user record from a validated payload.
#[utoipa::path(
    post,
    path = "/api/user",
    request_body = UserPayload,
    responses(
        (
            status = 201,
            description = "Created record, addressable via the Location header",
            body = User,
            headers(("Location" = String, description = "URL of the created record"))
        ),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let draft = draft_from_payload(payload.into_inner())?;

    let created = state
        .users
        .insert(&draft)
        .await
        .map_err(map_persistence_error)?;

    let location = format!("/api/user/{}", created.id());
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(created))
}

/// Replace every non-id field of an existing user record.
#[utoipa::path(
    put,
    path = "/api/user/{id}",
    params(("id" = String, Path, description = "User record id")),
    request_body = UserPayload,
    responses(
        (status = 204, description = "Record replaced"),
        (status = 400, description = "Malformed id or invalid payload", body = Error),
        (status = 404, description = "No record matches the id"),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path.into_inner(), ID)?;
    let draft = draft_from_payload(payload.into_inner())?;

    match state.users.replace(&id, &draft).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(UserPersistenceError::Conflict { message }) => {
            // A concurrent writer raced this update. Only a row that has
            // vanished in the meantime is recoverable as a 404; anything
            // else stays fatal since there is no retry logic.
            match state
                .users
                .find_by_id(&id)
                .await
                .map_err(map_persistence_error)?
            {
                None => Err(not_found()),
                Some(_) => Err(Error::internal(message)),
            }
        }
        Err(other) => Err(map_persistence_error(other)),
    }
}

/// Remove a user record by id.
#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    params(("id" = String, Path, description = "User record id")),
    responses(
        (status = 204, description = "Record removed"),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "No record matches the id"),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path.into_inner(), ID)?;

    state
        .users
        .delete(&id)
        .await
        .map_err(map_persistence_error)?;
    Ok(HttpResponse::NoContent().finish())
}
