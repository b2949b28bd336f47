mod guard;

pub use guard::{verify_key, ApiKey, API_KEY_HEADER};
