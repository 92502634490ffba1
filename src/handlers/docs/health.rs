// Health endpoint OpenAPI documentation

use serde_json::json;

/// Health check endpoint documentation
pub fn health_endpoint() -> serde_json::Value {
    json!({
        "get": {
            "tags": ["Health"],
            "summary": "Service health check",
            "description": "Reports overall status plus per-component detail (PostgreSQL pool).",
            "operationId": "healthCheck",
            "responses": {
                "200": { "description": "Service healthy" },
                "503": { "description": "One or more components unhealthy" }
            }
        }
    })
}
