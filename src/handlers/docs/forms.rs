// Form endpoints OpenAPI documentation

use serde_json::json;

/// Contact form endpoint documentation
pub fn contact_endpoint() -> serde_json::Value {
    json!({
        "post": {
            "tags": ["Forms"],
            "summary": "Submit a contact-form message",
            "operationId": "submitContact",
            "requestBody": {
                "required": true,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ContactRequest" },
                        "example": {
                            "firstName": "Ada",
                            "lastName": "Lovelace",
                            "email": "ada@example.com",
                            "phone": "15551234567",
                            "subject": "Question about plans",
                            "message": "Does the yearly plan include mock exams?"
                        }
                    }
                }
            },
            "responses": {
                "201": { "description": "Message stored" },
                "400": { "description": "Validation failed" },
                "500": { "description": "Internal server error" }
            }
        }
    })
}

/// Demo form endpoint documentation
pub fn demo_endpoint() -> serde_json::Value {
    json!({
        "post": {
            "tags": ["Forms"],
            "summary": "Submit a demo request",
            "operationId": "submitDemo",
            "requestBody": {
                "required": true,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/DemoRequest" },
                        "example": {
                            "firstName": "Ada",
                            "lastName": "Lovelace",
                            "email": "ada@example.com",
                            "school": "Analytical Engine University",
                            "phone": "15551234567"
                        }
                    }
                }
            },
            "responses": {
                "201": { "description": "Request stored" },
                "400": { "description": "Validation failed" },
                "500": { "description": "Internal server error" }
            }
        }
    })
}
