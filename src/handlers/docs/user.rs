// User endpoints OpenAPI documentation

use serde_json::json;

/// Profile endpoint documentation
pub fn profile_endpoint() -> serde_json::Value {
    json!({
        "get": {
            "tags": ["User"],
            "summary": "Fetch the current user's profile",
            "description": "Returns profile, trial window and subscription state. The password hash is never included.",
            "operationId": "getProfile",
            "security": [ { "bearerAuth": [] }, { "cookieAuth": [] } ],
            "responses": {
                "200": {
                    "description": "Profile",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/UserInfo" }
                        }
                    }
                },
                "401": { "description": "Missing or invalid token" },
                "404": { "description": "User not found" }
            }
        }
    })
}

/// Account endpoint documentation
pub fn account_endpoint() -> serde_json::Value {
    json!({
        "delete": {
            "tags": ["User"],
            "summary": "Delete the current user's account",
            "description": "Removes the user and all associated payment history in one transaction.",
            "operationId": "deleteAccount",
            "security": [ { "bearerAuth": [] }, { "cookieAuth": [] } ],
            "responses": {
                "200": { "description": "Account deleted" },
                "401": { "description": "Missing or invalid token" },
                "404": { "description": "User not found" }
            }
        }
    })
}
