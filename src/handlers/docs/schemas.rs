// OpenAPI schema definitions

use serde_json::json;

/// Return all schema definitions
pub fn all_schemas() -> serde_json::Value {
    json!({
        "SignupRequest": signup_request_schema(),
        "LoginRequest": login_request_schema(),
        "TokenResponse": token_response_schema(),
        "UserInfo": user_info_schema(),
        "PlanInfo": plan_info_schema(),
        "PurchaseRequest": purchase_request_schema(),
        "PurchaseResponse": purchase_response_schema(),
        "ContactRequest": contact_request_schema(),
        "DemoRequest": demo_request_schema(),
        "AuthError": auth_error_schema(),
    })
}

fn signup_request_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "required": ["firstName", "lastName", "email", "password", "school", "year"],
        "properties": {
            "firstName": { "type": "string", "maxLength": 100 },
            "lastName": { "type": "string", "maxLength": 100 },
            "email": { "type": "string", "format": "email", "maxLength": 320 },
            "password": {
                "type": "string",
                "format": "password",
                "minLength": 6,
                "description": "Minimum 6 characters"
            },
            "school": { "type": "string", "maxLength": 255 },
            "year": {
                "type": "string",
                "maxLength": 50,
                "description": "Graduation year"
            }
        }
    })
}

fn login_request_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "required": ["email", "password"],
        "properties": {
            "email": { "type": "string", "format": "email" },
            "password": { "type": "string", "format": "password" }
        }
    })
}

fn token_response_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "success": { "type": "boolean" },
            "data": {
                "type": "object",
                "properties": {
                    "token": {
                        "type": "string",
                        "description": "Signed JWT, also set as an httpOnly cookie"
                    },
                    "expires_in": {
                        "type": "integer",
                        "description": "Token lifetime in seconds"
                    },
                    "user": { "$ref": "#/components/schemas/UserInfo" }
                }
            },
            "message": { "type": "string" }
        }
    })
}

fn user_info_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "string", "format": "uuid" },
            "firstName": { "type": "string" },
            "lastName": { "type": "string" },
            "email": { "type": "string", "format": "email" },
            "school": { "type": "string" },
            "graduationYear": { "type": "string" },
            "trialStartedAt": { "type": "string", "format": "date-time" },
            "trialEndsAt": { "type": "string", "format": "date-time" },
            "subscriptionStatus": {
                "type": "string",
                "enum": ["trial", "active", "expired"]
            },
            "subscriptionPlan": { "type": "string", "nullable": true },
            "subscriptionEndsAt": { "type": "string", "format": "date-time", "nullable": true },
            "createdAt": { "type": "string", "format": "date-time" }
        }
    })
}

fn plan_info_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "string", "format": "uuid" },
            "name": { "type": "string" },
            "priceCents": {
                "type": "integer",
                "description": "Price in cents, e.g. 999 for $9.99"
            },
            "durationMonths": { "type": "integer" },
            "features": {
                "type": "array",
                "items": { "type": "string" }
            }
        }
    })
}

fn purchase_request_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "required": ["planId", "paymentData"],
        "properties": {
            "planId": { "type": "string", "format": "uuid" },
            "paymentData": {
                "type": "object",
                "required": ["amountCents"],
                "properties": {
                    "amountCents": {
                        "type": "integer",
                        "description": "Must equal the plan's catalog price"
                    },
                    "paymentMethod": { "type": "string", "example": "credit_card" }
                }
            }
        }
    })
}

fn purchase_response_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "success": { "type": "boolean" },
            "data": {
                "type": "object",
                "properties": {
                    "transactionId": { "type": "string", "example": "txn_1718900000000_a1b2c3d4e" },
                    "plan": { "type": "string" },
                    "amountCents": { "type": "integer" },
                    "subscriptionEndsAt": { "type": "string", "format": "date-time" }
                }
            },
            "message": { "type": "string" }
        }
    })
}

fn contact_request_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "required": ["firstName", "lastName", "email", "subject", "message"],
        "properties": {
            "firstName": { "type": "string", "maxLength": 50 },
            "lastName": { "type": "string", "maxLength": 50 },
            "email": { "type": "string", "format": "email" },
            "phone": {
                "type": "string",
                "maxLength": 20,
                "description": "Digits only",
                "nullable": true
            },
            "subject": { "type": "string", "maxLength": 100 },
            "message": { "type": "string", "maxLength": 1000 }
        }
    })
}

fn demo_request_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "required": ["firstName", "lastName", "email", "school", "phone"],
        "properties": {
            "firstName": { "type": "string", "maxLength": 50 },
            "lastName": { "type": "string", "maxLength": 50 },
            "email": { "type": "string", "format": "email" },
            "school": { "type": "string", "maxLength": 100 },
            "phone": { "type": "string", "maxLength": 20, "description": "Digits only" }
        }
    })
}

fn auth_error_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "success": { "type": "boolean", "example": false },
            "error": {
                "type": "object",
                "properties": {
                    "code": { "type": "string", "example": "INVALID_CREDENTIALS" },
                    "description": { "type": "string" }
                }
            },
            "message": { "type": "string" }
        }
    })
}
