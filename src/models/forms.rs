// Marketing-site form intake rows: contact messages and demo requests

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{contact_messages, demo_requests};

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = contact_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ContactMessage {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contact_messages)]
pub struct NewContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl NewContactMessage {
    pub async fn insert(
        self,
        conn: &mut AsyncPgConnection,
    ) -> Result<Uuid, diesel::result::Error> {
        use crate::schema::contact_messages::dsl::*;

        diesel::insert_into(contact_messages)
            .values(&self)
            .returning(id)
            .get_result(conn)
            .await
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = demo_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DemoRequest {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub school: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = demo_requests)]
pub struct NewDemoRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub school: String,
    pub phone: Option<String>,
}

impl NewDemoRequest {
    pub async fn insert(
        self,
        conn: &mut AsyncPgConnection,
    ) -> Result<Uuid, diesel::result::Error> {
        use crate::schema::demo_requests::dsl::*;

        diesel::insert_into(demo_requests)
            .values(&self)
            .returning(id)
            .get_result(conn)
            .await
    }
}
