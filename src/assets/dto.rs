use serde::{Deserialize, Serialize};

/// Full field set for creating or replacing an asset.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssetPayload {
    pub name: String,
    /// Soft reference to a user id; never checked against the users table.
    pub owner_id: i64,
    pub symbol: String,
    pub kind: String,
    pub price: f64,
}

/// Acknowledgement returned by DELETE /assets/:id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: i64,
}
