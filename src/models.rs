// src/models.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i32,
    pub member_id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub join_date: String,
    pub membership_plan: String, // Monthly | Quarterly | Half-Yearly | Yearly
    pub status: String,          // Active | Inactive
    pub last_payment_date: String, // "" until the first recorded payment
    pub next_due_date: String,     // "" or YYYY-MM-DD; manually editable
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i32,
    /// Owning member's storage id.
    #[sqlx(rename = "member_ref")]
    pub member: i32,
    pub member_id: String,
    pub amount: f64,
    pub payment_date: String,
    pub payment_method: String, // Cash | UPI | Card | NetBanking
    pub note: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Payment with its member record embedded, for the global payments listing.
/// `member` is null when the member was deleted after the payment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentWithMember {
    pub id: i32,
    pub member: Option<Member>,
    pub member_id: String,
    pub amount: f64,
    pub payment_date: String,
    pub payment_method: String,
    pub note: String,
    pub created_at: Option<DateTime<Utc>>,
}
