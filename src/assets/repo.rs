use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use super::dto::AssetPayload;

/// Asset record as stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Asset {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub symbol: String,
    pub kind: String,
    pub price: f64,
}

impl Asset {
    pub async fn list(db: &PgPool) -> sqlx::Result<Vec<Asset>> {
        let assets = sqlx::query_as::<_, Asset>(
            r#"
            SELECT id, name, owner_id, symbol, kind, price
            FROM assets
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(assets)
    }

    pub async fn find_by_symbol(db: &PgPool, symbol: &str) -> sqlx::Result<Option<Asset>> {
        let asset = sqlx::query_as::<_, Asset>(
            r#"
            SELECT id, name, owner_id, symbol, kind, price
            FROM assets
            WHERE symbol = $1
            "#,
        )
        .bind(symbol)
        .fetch_optional(db)
        .await?;
        Ok(asset)
    }

    pub async fn create(db: &PgPool, fields: &AssetPayload) -> sqlx::Result<Asset> {
        let asset = sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (name, owner_id, symbol, kind, price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, owner_id, symbol, kind, price
            "#,
        )
        .bind(&fields.name)
        .bind(fields.owner_id)
        .bind(&fields.symbol)
        .bind(&fields.kind)
        .bind(fields.price)
        .fetch_one(db)
        .await?;
        Ok(asset)
    }

    /// Full replacement; `None` when no row with `id` exists.
    pub async fn update(db: &PgPool, id: i64, fields: &AssetPayload) -> sqlx::Result<Option<Asset>> {
        let asset = sqlx::query_as::<_, Asset>(
            r#"
            UPDATE assets
            SET name = $2, owner_id = $3, symbol = $4, kind = $5, price = $6
            WHERE id = $1
            RETURNING id, name, owner_id, symbol, kind, price
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(fields.owner_id)
        .bind(&fields.symbol)
        .bind(&fields.kind)
        .bind(fields.price)
        .fetch_optional(db)
        .await?;
        Ok(asset)
    }

    /// Returns the number of rows removed (0 or 1).
    pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM assets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }
}
