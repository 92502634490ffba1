// Payment history records
// Append-only; rows are created inside the purchase transaction and removed
// only by cascading user deletion

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::payment_history;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = payment_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub amount_cents: i32, // Amount in cents (e.g., 999 for $9.99)
    pub currency: String,
    pub status: String,
    pub payment_method: Option<String>,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payment_history)]
pub struct NewPaymentRecord {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub amount_cents: i32,
    pub currency: String,
    pub status: String,
    pub payment_method: Option<String>,
    pub transaction_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "completed" => Some(PaymentStatus::Completed),
            "failed" => Some(PaymentStatus::Failed),
            "refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

impl PaymentRecord {
    pub async fn find_by_user_id(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        use crate::schema::payment_history::dsl;

        dsl::payment_history
            .filter(dsl::user_id.eq(user_id))
            .order(dsl::created_at.desc())
            .load::<Self>(conn)
            .await
    }

    pub async fn count_for_user(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> Result<i64, diesel::result::Error> {
        use crate::schema::payment_history::dsl;

        dsl::payment_history
            .filter(dsl::user_id.eq(user_id))
            .count()
            .get_result(conn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_round_trip() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Completed,
            PaymentStatus::Failed,
            PaymentStatus::Refunded,
        ] {
            assert_eq!(
                PaymentStatus::from_string(status.as_str()),
                Some(status.clone())
            );
        }
        assert_eq!(PaymentStatus::from_string("cancelled"), None);
    }
}
