use serde::{Deserialize, Serialize};

/// Full field set for creating or replacing a user.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
}

/// Acknowledgement returned by DELETE /users/:id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: i64,
}
