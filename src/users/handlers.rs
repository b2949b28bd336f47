use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::ApiKey;
use crate::error::{conflict_on_unique, ApiError};
use crate::state::AppState;

use super::dto::{Deleted, UserPayload};
use super::repo::User;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/:id", put(update_user).delete(delete_user))
}

fn validate(payload: &mut UserPayload) -> Result<(), ApiError> {
    payload.name = payload.name.trim().to_string();
    if payload.name.is_empty() {
        return Err(ApiError::Invalid("name must not be empty".into()));
    }
    Ok(())
}

fn duplicate_name(name: &str) -> String {
    format!("user name '{name}' already exists")
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = User::list(&state.db).await?;
    Ok(Json(users))
}

#[instrument(skip(state, _key, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    _key: ApiKey,
    Json(mut payload): Json<UserPayload>,
) -> Result<Json<User>, ApiError> {
    validate(&mut payload)?;

    // Racing creates on the same name are settled by the UNIQUE constraint.
    if User::find_by_name(&state.db, &payload.name).await?.is_some() {
        warn!(name = %payload.name, "user name already taken");
        return Err(ApiError::Conflict(duplicate_name(&payload.name)));
    }

    let user = User::create(&state.db, &payload.name)
        .await
        .map_err(|e| conflict_on_unique(e, &duplicate_name(&payload.name)))?;

    info!(user_id = user.id, name = %user.name, "user created");
    Ok(Json(user))
}

#[instrument(skip(state, _key, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    _key: ApiKey,
    Path(id): Path<i64>,
    Json(mut payload): Json<UserPayload>,
) -> Result<Json<User>, ApiError> {
    validate(&mut payload)?;

    let user = User::update(&state.db, id, &payload.name)
        .await
        .map_err(|e| conflict_on_unique(e, &duplicate_name(&payload.name)))?
        .ok_or_else(|| {
            warn!(user_id = id, "update for unknown user");
            ApiError::NotFound(format!("no user with id {id}"))
        })?;

    info!(user_id = user.id, name = %user.name, "user updated");
    Ok(Json(user))
}

#[instrument(skip(state, _key))]
pub async fn delete_user(
    State(state): State<AppState>,
    _key: ApiKey,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, ApiError> {
    let removed = User::delete(&state.db, id).await?;
    if removed == 0 {
        warn!(user_id = id, "delete for unknown user");
        return Err(ApiError::NotFound(format!("no user with id {id}")));
    }

    info!(user_id = id, "user deleted");
    Ok(Json(Deleted { deleted: id }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_trims_surrounding_whitespace() {
        let mut payload = UserPayload {
            name: "  alice  ".into(),
        };
        validate(&mut payload).expect("valid name");
        assert_eq!(payload.name, "alice");
    }

    #[test]
    fn validate_rejects_empty_name() {
        let mut payload = UserPayload { name: "   ".into() };
        let err = validate(&mut payload).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn payload_requires_name_field() {
        assert!(serde_json::from_str::<UserPayload>("{}").is_err());
        let payload: UserPayload = serde_json::from_str(r#"{"name":"alice"}"#).unwrap();
        assert_eq!(payload.name, "alice");
    }

    #[test]
    fn user_serializes_with_id_and_name() {
        let user = User {
            id: 1,
            name: "alice".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains(r#""id":1"#));
        assert!(json.contains(r#""name":"alice""#));
    }
}
