// Subscription purchase service
// Owns the transactional trial-to-paid transition: payment row insert and
// user subscription update commit together or not at all

use chrono::{DateTime, Months, Utc};
use diesel_async::{AsyncConnection, AsyncPgConnection};
use rand::{distributions::Alphanumeric, Rng};
use thiserror::Error;
use uuid::Uuid;

use crate::models::payment::{NewPaymentRecord, PaymentStatus};
use crate::models::plan::SubscriptionPlan;
use crate::models::user::{SubscriptionStatus, SubscriptionUpdate, User, UserError};

const DEFAULT_CURRENCY: &str = "USD";
const DEFAULT_PAYMENT_METHOD: &str = "credit_card";
const TRANSACTION_SUFFIX_LEN: usize = 9;

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("Invalid subscription plan")]
    PlanNotFound,

    #[error("Payment amount does not match plan price")]
    AmountMismatch { expected_cents: i32, actual_cents: i32 },

    #[error("Invalid plan duration")]
    InvalidDuration,

    #[error("User error: {0}")]
    User(#[from] UserError),

    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
}

/// Result of a successful purchase
#[derive(Debug, Clone)]
pub struct PurchaseOutcome {
    pub transaction_id: String,
    pub plan_name: String,
    pub amount_cents: i32,
    pub subscription_ends_at: DateTime<Utc>,
}

pub struct SubscriptionService;

impl Default for SubscriptionService {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionService {
    pub fn new() -> Self {
        Self
    }

    /// List the active plan catalog, cheapest first
    pub async fn list_plans(
        &self,
        conn: &mut AsyncPgConnection,
    ) -> Result<Vec<SubscriptionPlan>, SubscriptionError> {
        SubscriptionPlan::list_active(conn).await.map_err(Into::into)
    }

    /// Purchase a subscription plan for a user.
    ///
    /// Inside one transaction: load the active plan, check the charged
    /// amount against the catalog price, append a completed payment row and
    /// move the user to `active` with an end date `duration_months` out.
    /// Any failure rolls the whole thing back.
    pub async fn purchase(
        &self,
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
        plan_id: Uuid,
        amount_cents: i32,
        payment_method: Option<String>,
    ) -> Result<PurchaseOutcome, SubscriptionError> {
        conn.transaction::<_, SubscriptionError, _>(|tx| {
            Box::pin(async move {
                let plan = SubscriptionPlan::find_active_by_id(tx, plan_id)
                    .await?
                    .ok_or(SubscriptionError::PlanNotFound)?;

                if amount_cents != plan.price_cents {
                    return Err(SubscriptionError::AmountMismatch {
                        expected_cents: plan.price_cents,
                        actual_cents: amount_cents,
                    });
                }

                let now = Utc::now();
                let ends_at = subscription_end_date(now, plan.duration_months)
                    .ok_or(SubscriptionError::InvalidDuration)?;
                let transaction_id = generate_transaction_id(now);

                let payment = NewPaymentRecord {
                    user_id,
                    plan_id: plan.id,
                    amount_cents: plan.price_cents,
                    currency: DEFAULT_CURRENCY.to_string(),
                    status: PaymentStatus::Completed.as_str().to_string(),
                    payment_method: Some(
                        payment_method.unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
                    ),
                    transaction_id: transaction_id.clone(),
                };

                {
                    use crate::schema::payment_history::dsl::*;
                    use diesel_async::RunQueryDsl;

                    diesel::insert_into(payment_history)
                        .values(&payment)
                        .execute(tx)
                        .await?;
                }

                User::update_subscription(
                    tx,
                    user_id,
                    SubscriptionUpdate {
                        subscription_status: SubscriptionStatus::Active.as_str().to_string(),
                        subscription_plan: Some(plan.name.clone()),
                        subscription_ends_at: Some(ends_at),
                        updated_at: now,
                    },
                )
                .await?;

                tracing::info!(
                    user_id = %user_id,
                    plan = %plan.name,
                    transaction_id = %transaction_id,
                    "Subscription purchase committed"
                );

                Ok(PurchaseOutcome {
                    transaction_id,
                    plan_name: plan.name,
                    amount_cents: plan.price_cents,
                    subscription_ends_at: ends_at,
                })
            })
        })
        .await
    }
}

/// Subscription end date: `months` calendar months after `from`
pub(crate) fn subscription_end_date(
    from: DateTime<Utc>,
    months: i32,
) -> Option<DateTime<Utc>> {
    if months <= 0 {
        return None;
    }
    from.checked_add_months(Months::new(months as u32))
}

/// Mock payment-processor transaction id: `txn_<millis>_<9 alphanumerics>`
pub(crate) fn generate_transaction_id(now: DateTime<Utc>) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TRANSACTION_SUFFIX_LEN)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();

    format!("txn_{}_{}", now.timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_subscription_end_date_monthly() {
        let from = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        let end = subscription_end_date(from, 1).unwrap();
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 2, 15, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_subscription_end_date_yearly() {
        let from = Utc.with_ymd_and_hms(2025, 6, 30, 0, 0, 0).unwrap();
        let end = subscription_end_date(from, 12).unwrap();
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 6, 30, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_subscription_end_date_clamps_short_months() {
        // Jan 31 + 1 month lands on the last day of February
        let from = Utc.with_ymd_and_hms(2025, 1, 31, 9, 30, 0).unwrap();
        let end = subscription_end_date(from, 1).unwrap();
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 2, 28, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_subscription_end_date_rejects_non_positive() {
        let from = Utc::now();
        assert!(subscription_end_date(from, 0).is_none());
        assert!(subscription_end_date(from, -3).is_none());
    }

    #[test]
    fn test_transaction_id_format() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let id = generate_transaction_id(now);

        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "txn");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), TRANSACTION_SUFFIX_LEN);
        assert!(parts[2].chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(parts[2], parts[2].to_lowercase());
    }

    #[test]
    fn test_transaction_ids_are_unique() {
        let now = Utc::now();
        let a = generate_transaction_id(now);
        let b = generate_transaction_id(now);
        assert_ne!(a, b);
    }
}
