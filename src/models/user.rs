// User Database Model
// Identity + profile, credentials, trial window, subscription state

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::schema::users;

/// Subscription lifecycle state for a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, diesel::expression::AsExpression)]
#[diesel(sql_type = diesel::sql_types::Text)]
pub enum SubscriptionStatus {
    Trial,   // Time-boxed free access window starting at signup
    Active,  // Paid subscription with a future end date
    Expired, // Trial or paid window has lapsed
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Trial => "trial",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Expired => "expired",
        }
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trial" => Ok(SubscriptionStatus::Trial),
            "active" => Ok(SubscriptionStatus::Active),
            "expired" => Ok(SubscriptionStatus::Expired),
            _ => Err(format!("Invalid subscription status: {}", s)),
        }
    }
}

impl<DB> diesel::deserialize::FromSql<diesel::sql_types::Text, DB> for SubscriptionStatus
where
    DB: diesel::backend::Backend,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, DB>,
{
    fn from_sql(bytes: DB::RawValue<'_>) -> diesel::deserialize::Result<Self> {
        let value = String::from_sql(bytes)?;
        Self::from_str(&value).map_err(|e| e.into())
    }
}

impl<DB> diesel::serialize::ToSql<diesel::sql_types::Text, DB> for SubscriptionStatus
where
    DB: diesel::backend::Backend,
    str: diesel::serialize::ToSql<diesel::sql_types::Text, DB>,
{
    fn to_sql<'b>(
        &'b self,
        out: &mut diesel::serialize::Output<'b, '_, DB>,
    ) -> diesel::serialize::Result {
        self.as_str().to_sql(out)
    }
}

/// User database model - queryable from database
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub school: String,
    pub graduation_year: String,
    pub trial_started_at: DateTime<Utc>,
    pub trial_ends_at: DateTime<Utc>,
    pub subscription_status: String, // Will convert to enum
    pub subscription_plan: Option<String>,
    pub subscription_ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New user for insertion; trial window and status come from column defaults
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub school: String,
    pub graduation_year: String,
}

/// Subscription fields update, applied atomically during a purchase
#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct SubscriptionUpdate {
    pub subscription_status: String,
    pub subscription_plan: Option<String>,
    pub subscription_ends_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Errors for user operations
#[derive(thiserror::Error, Debug)]
pub enum UserError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("User not found")]
    NotFound,

    #[error("Invalid user ID format")]
    InvalidId,

    #[error("Connection pool error")]
    Pool(String),
}

impl User {
    /// Find user by ID
    pub async fn find_by_id(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> Result<Self, UserError> {
        use crate::schema::users::dsl::*;

        users
            .filter(id.eq(user_id))
            .first::<User>(conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => UserError::NotFound,
                _ => UserError::Database(e),
            })
    }

    /// Find user by email (case-insensitive)
    pub async fn find_by_email(
        conn: &mut AsyncPgConnection,
        email_str: &str,
    ) -> Result<Self, UserError> {
        use crate::schema::users::dsl::*;
        use diesel::PgTextExpressionMethods;

        users
            .filter(email.ilike(email_str))
            .first::<User>(conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => UserError::NotFound,
                _ => UserError::Database(e),
            })
    }

    /// Create a new user
    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_user: NewUser,
    ) -> Result<Self, UserError> {
        use crate::schema::users::dsl::*;

        diesel::insert_into(users)
            .values(&new_user)
            .get_result::<User>(conn)
            .await
            .map_err(UserError::Database)
    }

    /// Apply a subscription update to a user row
    pub async fn update_subscription(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
        update: SubscriptionUpdate,
    ) -> Result<Self, UserError> {
        use crate::schema::users::dsl::*;

        diesel::update(users.filter(id.eq(user_id)))
            .set(&update)
            .get_result::<User>(conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => UserError::NotFound,
                _ => UserError::Database(e),
            })
    }

    /// Delete a user together with their payment history, atomically.
    /// Returns the number of payment rows removed.
    pub async fn delete_with_history(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> Result<usize, UserError> {
        conn.transaction::<_, UserError, _>(|tx| {
            Box::pin(async move {
                use crate::schema::payment_history::dsl as ph;
                use crate::schema::users::dsl as u;

                let payments_removed = diesel::delete(ph::payment_history.filter(ph::user_id.eq(user_id)))
                    .execute(tx)
                    .await?;

                let users_removed = diesel::delete(u::users.filter(u::id.eq(user_id)))
                    .execute(tx)
                    .await?;

                if users_removed == 0 {
                    return Err(UserError::NotFound);
                }

                Ok(payments_removed)
            })
        })
        .await
    }

    /// Get user's subscription status as enum
    pub fn subscription_status_enum(&self) -> SubscriptionStatus {
        SubscriptionStatus::from_str(&self.subscription_status).unwrap_or_else(|e| {
            tracing::warn!(
                "Invalid subscription status '{}' for user {}, defaulting to Expired: {}",
                self.subscription_status,
                self.id,
                e
            );
            SubscriptionStatus::Expired
        })
    }

    /// Whether the user currently has access: an unexpired trial window or an
    /// active subscription with a future end date
    pub fn subscription_is_current(&self) -> bool {
        let now = Utc::now();
        match self.subscription_status_enum() {
            SubscriptionStatus::Trial => self.trial_ends_at > now,
            SubscriptionStatus::Active => {
                self.subscription_ends_at.map(|end| end > now).unwrap_or(false)
            },
            SubscriptionStatus::Expired => false,
        }
    }
}

/// User profile shape returned by the API; never carries the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub school: String,
    pub graduation_year: String,
    pub trial_started_at: DateTime<Utc>,
    pub trial_ends_at: DateTime<Utc>,
    pub subscription_status: String,
    pub subscription_plan: Option<String>,
    pub subscription_ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            school: user.school,
            graduation_year: user.graduation_year,
            trial_started_at: user.trial_started_at,
            trial_ends_at: user.trial_ends_at,
            subscription_status: user.subscription_status,
            subscription_plan: user.subscription_plan,
            subscription_ends_at: user.subscription_ends_at,
            created_at: user.created_at,
        }
    }
}
