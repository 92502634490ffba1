// Authenticated user identity extracted from a verified token

use serde::{Deserialize, Serialize};

/// Authenticated user information extracted from the token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub exp: u64,
}
