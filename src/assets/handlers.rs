use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::ApiKey;
use crate::error::{conflict_on_unique, ApiError};
use crate::state::AppState;

use super::dto::{AssetPayload, Deleted};
use super::repo::Asset;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/assets", get(list_assets))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/assets", post(create_asset))
        .route("/assets/:id", put(update_asset).delete(delete_asset))
}

fn validate(payload: &mut AssetPayload) -> Result<(), ApiError> {
    payload.name = payload.name.trim().to_string();
    payload.symbol = payload.symbol.trim().to_uppercase();
    payload.kind = payload.kind.trim().to_lowercase();

    if payload.name.is_empty() {
        return Err(ApiError::Invalid("name must not be empty".into()));
    }
    if payload.symbol.is_empty() {
        return Err(ApiError::Invalid("symbol must not be empty".into()));
    }
    if payload.kind.is_empty() {
        return Err(ApiError::Invalid("kind must not be empty".into()));
    }
    if !payload.price.is_finite() || payload.price < 0.0 {
        return Err(ApiError::Invalid(
            "price must be a non-negative number".into(),
        ));
    }
    Ok(())
}

fn duplicate_symbol(symbol: &str) -> String {
    format!("asset symbol '{symbol}' already exists")
}

#[instrument(skip(state))]
pub async fn list_assets(State(state): State<AppState>) -> Result<Json<Vec<Asset>>, ApiError> {
    let assets = Asset::list(&state.db).await?;
    Ok(Json(assets))
}

#[instrument(skip(state, _key, payload))]
pub async fn create_asset(
    State(state): State<AppState>,
    _key: ApiKey,
    Json(mut payload): Json<AssetPayload>,
) -> Result<Json<Asset>, ApiError> {
    validate(&mut payload)?;

    // Racing creates on the same symbol are settled by the UNIQUE constraint.
    if Asset::find_by_symbol(&state.db, &payload.symbol)
        .await?
        .is_some()
    {
        warn!(symbol = %payload.symbol, "asset symbol already taken");
        return Err(ApiError::Conflict(duplicate_symbol(&payload.symbol)));
    }

    let asset = Asset::create(&state.db, &payload)
        .await
        .map_err(|e| conflict_on_unique(e, &duplicate_symbol(&payload.symbol)))?;

    info!(asset_id = asset.id, symbol = %asset.symbol, "asset created");
    Ok(Json(asset))
}

#[instrument(skip(state, _key, payload))]
pub async fn update_asset(
    State(state): State<AppState>,
    _key: ApiKey,
    Path(id): Path<i64>,
    Json(mut payload): Json<AssetPayload>,
) -> Result<Json<Asset>, ApiError> {
    validate(&mut payload)?;

    let asset = Asset::update(&state.db, id, &payload)
        .await
        .map_err(|e| conflict_on_unique(e, &duplicate_symbol(&payload.symbol)))?
        .ok_or_else(|| {
            warn!(asset_id = id, "update for unknown asset");
            ApiError::NotFound(format!("no asset with id {id}"))
        })?;

    info!(asset_id = asset.id, symbol = %asset.symbol, "asset updated");
    Ok(Json(asset))
}

#[instrument(skip(state, _key))]
pub async fn delete_asset(
    State(state): State<AppState>,
    _key: ApiKey,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, ApiError> {
    let removed = Asset::delete(&state.db, id).await?;
    if removed == 0 {
        warn!(asset_id = id, "delete for unknown asset");
        return Err(ApiError::NotFound(format!("no asset with id {id}")));
    }

    info!(asset_id = id, "asset deleted");
    Ok(Json(Deleted { deleted: id }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> AssetPayload {
        AssetPayload {
            name: "Bitcoin".into(),
            owner_id: 1,
            symbol: "btc".into(),
            kind: "Coin".into(),
            price: 64000.0,
        }
    }

    #[test]
    fn validate_normalizes_symbol_and_kind() {
        let mut p = payload();
        validate(&mut p).expect("valid payload");
        assert_eq!(p.symbol, "BTC");
        assert_eq!(p.kind, "coin");
    }

    #[test]
    fn validate_rejects_blank_fields() {
        for field in ["name", "symbol", "kind"] {
            let mut p = payload();
            match field {
                "name" => p.name = " ".into(),
                "symbol" => p.symbol = String::new(),
                _ => p.kind = "\t".into(),
            }
            let err = validate(&mut p).unwrap_err();
            assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn validate_rejects_malformed_price() {
        for bad in [-0.01, f64::NAN, f64::INFINITY] {
            let mut p = payload();
            p.price = bad;
            let err = validate(&mut p).unwrap_err();
            assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn payload_requires_full_field_set() {
        // update is full replacement, so a partial body must not parse
        assert!(serde_json::from_str::<AssetPayload>(r#"{"name":"Bitcoin"}"#).is_err());

        let json = r#"{"name":"Bitcoin","owner_id":1,"symbol":"BTC","kind":"coin","price":64000.0}"#;
        let p: AssetPayload = serde_json::from_str(json).unwrap();
        assert_eq!(p.owner_id, 1);
        assert_eq!(p.price, 64000.0);
    }
}
