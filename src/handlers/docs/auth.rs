// Authentication endpoints OpenAPI documentation

use serde_json::json;

/// Signup endpoint documentation
pub fn signup_endpoint() -> serde_json::Value {
    json!({
        "post": {
            "tags": ["Authentication"],
            "summary": "Create a new account",
            "description": "Registers a user with profile details and a password (minimum 6 characters). A 30-day trial starts immediately. On success the signed token is returned in the body and set as an httpOnly cookie.",
            "operationId": "signup",
            "requestBody": {
                "required": true,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/SignupRequest" },
                        "example": {
                            "firstName": "Ada",
                            "lastName": "Lovelace",
                            "email": "ada@example.com",
                            "password": "hunter42",
                            "school": "Analytical Engine University",
                            "year": "2027"
                        }
                    }
                }
            },
            "responses": {
                "201": {
                    "description": "User created",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/TokenResponse" }
                        }
                    }
                },
                "400": { "description": "Validation failed" },
                "409": { "description": "Email already registered" },
                "500": { "description": "Internal server error" }
            }
        }
    })
}

/// Login endpoint documentation
pub fn login_endpoint() -> serde_json::Value {
    json!({
        "post": {
            "tags": ["Authentication"],
            "summary": "Authenticate and receive a token",
            "description": "The 401 response is identical whether the email or the password was wrong.",
            "operationId": "login",
            "requestBody": {
                "required": true,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/LoginRequest" },
                        "example": {
                            "email": "ada@example.com",
                            "password": "hunter42"
                        }
                    }
                }
            },
            "responses": {
                "200": {
                    "description": "Login successful",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/TokenResponse" }
                        }
                    }
                },
                "400": { "description": "Email and password are required" },
                "401": {
                    "description": "Invalid email or password",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/AuthError" }
                        }
                    }
                }
            }
        }
    })
}

/// Logout endpoint documentation
pub fn logout_endpoint() -> serde_json::Value {
    json!({
        "post": {
            "tags": ["Authentication"],
            "summary": "Clear the auth cookie",
            "description": "Tokens are stateless; this endpoint removes the httpOnly cookie and clients drop their stored copy.",
            "operationId": "logout",
            "responses": {
                "200": { "description": "Logged out" }
            }
        }
    })
}

/// Refresh endpoint documentation
pub fn refresh_endpoint() -> serde_json::Value {
    json!({
        "post": {
            "tags": ["Authentication"],
            "summary": "Reissue a token",
            "description": "Verifies the presented token (cookie or bearer), reloads the user and returns a fresh 7-day token. Clients call this opportunistically when the current token nears expiry.",
            "operationId": "refreshToken",
            "security": [ { "bearerAuth": [] }, { "cookieAuth": [] } ],
            "responses": {
                "200": {
                    "description": "Token refreshed",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/TokenResponse" }
                        }
                    }
                },
                "401": { "description": "Missing, invalid or expired token" },
                "404": { "description": "User no longer exists" }
            }
        }
    })
}
