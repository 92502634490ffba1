// Subscription plan catalog
// Seeded by migrations; read-only from the application's perspective

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::subscription_plans;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = subscription_plans)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubscriptionPlan {
    pub id: Uuid,
    pub name: String,
    pub price_cents: i32,
    pub duration_months: i32,
    pub features: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl SubscriptionPlan {
    /// List active plans, cheapest first
    pub async fn list_active(
        conn: &mut AsyncPgConnection,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        use crate::schema::subscription_plans::dsl::*;

        subscription_plans
            .filter(is_active.eq(true))
            .order(price_cents.asc())
            .load::<Self>(conn)
            .await
    }

    /// Look up an active plan by id
    pub async fn find_active_by_id(
        conn: &mut AsyncPgConnection,
        plan_id: Uuid,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::subscription_plans::dsl::*;

        subscription_plans
            .filter(id.eq(plan_id))
            .filter(is_active.eq(true))
            .first::<Self>(conn)
            .await
            .optional()
    }
}

/// Plan shape returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInfo {
    pub id: String,
    pub name: String,
    pub price_cents: i32,
    pub duration_months: i32,
    pub features: Vec<String>,
}

impl From<SubscriptionPlan> for PlanInfo {
    fn from(plan: SubscriptionPlan) -> Self {
        Self {
            id: plan.id.to_string(),
            name: plan.name,
            price_cents: plan.price_cents,
            duration_months: plan.duration_months,
            features: plan.features,
        }
    }
}
