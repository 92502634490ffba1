// Subscription endpoints OpenAPI documentation

use serde_json::json;

/// Plan catalog endpoint documentation
pub fn plans_endpoint() -> serde_json::Value {
    json!({
        "get": {
            "tags": ["Subscription"],
            "summary": "List active subscription plans",
            "description": "Plans are seeded at startup and returned cheapest first. Prices are integer cents.",
            "operationId": "listPlans",
            "responses": {
                "200": {
                    "description": "Active plans",
                    "content": {
                        "application/json": {
                            "schema": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/PlanInfo" }
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Purchase endpoint documentation
pub fn create_endpoint() -> serde_json::Value {
    json!({
        "post": {
            "tags": ["Subscription"],
            "summary": "Purchase a subscription plan",
            "description": "Atomically records a completed payment and moves the user to `active` with an end date `durationMonths` out. The charged amount must equal the catalog price. A failure at any step rolls back both writes.",
            "operationId": "createSubscription",
            "security": [ { "bearerAuth": [] }, { "cookieAuth": [] } ],
            "requestBody": {
                "required": true,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/PurchaseRequest" },
                        "example": {
                            "planId": "8c0ffee0-1234-4abc-9def-0123456789ab",
                            "paymentData": {
                                "amountCents": 999,
                                "paymentMethod": "credit_card"
                            }
                        }
                    }
                }
            },
            "responses": {
                "200": {
                    "description": "Subscription created",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/PurchaseResponse" }
                        }
                    }
                },
                "400": { "description": "Missing fields, unknown plan, or amount mismatch" },
                "401": { "description": "Missing or invalid token" },
                "500": { "description": "Transaction failed and was rolled back" }
            }
        }
    })
}
