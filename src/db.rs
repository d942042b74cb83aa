// src/db.rs

use sqlx::{PgPool, Row};

use crate::models::{Member, Payment, PaymentWithMember};

const MEMBER_COLUMNS: &str = "id, member_id, name, phone, email, join_date, membership_plan, \
                              status, last_payment_date, next_due_date, created_at, updated_at";

const PAYMENT_COLUMNS: &str =
    "id, member_ref, member_id, amount, payment_date, payment_method, note, created_at";

pub async fn find_member_by_id(pool: &PgPool, id: i32) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(&format!(
        "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_member_by_member_id(
    pool: &PgPool,
    member_id: &str,
) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(&format!(
        "SELECT {MEMBER_COLUMNS} FROM members WHERE member_id = $1"
    ))
    .bind(member_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_members(pool: &PgPool) -> Result<Vec<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(&format!(
        "SELECT {MEMBER_COLUMNS} FROM members ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await
}

/// Equality filters; a None leaves that column unconstrained.
pub async fn filter_members(
    pool: &PgPool,
    status: Option<&str>,
    membership_plan: Option<&str>,
) -> Result<Vec<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(&format!(
        "SELECT {MEMBER_COLUMNS} FROM members
         WHERE ($1::text IS NULL OR status = $1)
           AND ($2::text IS NULL OR membership_plan = $2)
         ORDER BY created_at DESC, id DESC"
    ))
    .bind(status)
    .bind(membership_plan)
    .fetch_all(pool)
    .await
}

/// Case-insensitive substring match over member_id, name, phone and email.
pub async fn search_members(pool: &PgPool, key: &str) -> Result<Vec<Member>, sqlx::Error> {
    let pattern = format!("%{key}%");
    sqlx::query_as::<_, Member>(&format!(
        "SELECT {MEMBER_COLUMNS} FROM members
         WHERE member_id ILIKE $1 OR name ILIKE $1 OR phone ILIKE $1 OR email ILIKE $1
         ORDER BY created_at DESC, id DESC"
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await
}

pub struct NewMember<'a> {
    pub member_id: &'a str,
    pub name: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub join_date: &'a str,
    pub membership_plan: &'a str,
    pub status: &'a str,
}

pub async fn insert_member(pool: &PgPool, new: &NewMember<'_>) -> Result<Member, sqlx::Error> {
    sqlx::query_as::<_, Member>(&format!(
        "INSERT INTO members (member_id, name, phone, email, join_date, membership_plan, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {MEMBER_COLUMNS}"
    ))
    .bind(new.member_id)
    .bind(new.name)
    .bind(new.phone)
    .bind(new.email)
    .bind(new.join_date)
    .bind(new.membership_plan)
    .bind(new.status)
    .fetch_one(pool)
    .await
}

/// Writes every mutable column from the given (already merged) member.
/// member_id is the immutable business key and is never rewritten.
pub async fn update_member(pool: &PgPool, member: &Member) -> Result<Member, sqlx::Error> {
    sqlx::query_as::<_, Member>(&format!(
        "UPDATE members
         SET name = $1, phone = $2, email = $3, join_date = $4, membership_plan = $5,
             status = $6, last_payment_date = $7, next_due_date = $8, updated_at = now()
         WHERE id = $9
         RETURNING {MEMBER_COLUMNS}"
    ))
    .bind(&member.name)
    .bind(&member.phone)
    .bind(&member.email)
    .bind(&member.join_date)
    .bind(&member.membership_plan)
    .bind(&member.status)
    .bind(&member.last_payment_date)
    .bind(&member.next_due_date)
    .bind(member.id)
    .fetch_one(pool)
    .await
}

pub async fn delete_member_by_id(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM members WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_member_by_member_id(
    pool: &PgPool,
    member_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM members WHERE member_id = $1")
        .bind(member_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub struct NewPayment<'a> {
    pub member_ref: i32,
    pub member_id: &'a str,
    pub amount: f64,
    pub payment_date: &'a str,
    pub payment_method: &'a str,
    pub note: &'a str,
}

pub async fn insert_payment(pool: &PgPool, new: &NewPayment<'_>) -> Result<Payment, sqlx::Error> {
    sqlx::query_as::<_, Payment>(&format!(
        "INSERT INTO payments (member_ref, member_id, amount, payment_date, payment_method, note)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {PAYMENT_COLUMNS}"
    ))
    .bind(new.member_ref)
    .bind(new.member_id)
    .bind(new.amount)
    .bind(new.payment_date)
    .bind(new.payment_method)
    .bind(new.note)
    .fetch_one(pool)
    .await
}

pub async fn find_payment_by_id(pool: &PgPool, id: i32) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as::<_, Payment>(&format!(
        "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_payments_by_member_ref(
    pool: &PgPool,
    member_ref: i32,
) -> Result<Vec<Payment>, sqlx::Error> {
    sqlx::query_as::<_, Payment>(&format!(
        "SELECT {PAYMENT_COLUMNS} FROM payments WHERE member_ref = $1
         ORDER BY created_at DESC, id DESC"
    ))
    .bind(member_ref)
    .fetch_all(pool)
    .await
}

pub async fn list_payments_by_member_id(
    pool: &PgPool,
    member_id: &str,
) -> Result<Vec<Payment>, sqlx::Error> {
    sqlx::query_as::<_, Payment>(&format!(
        "SELECT {PAYMENT_COLUMNS} FROM payments WHERE member_id = $1
         ORDER BY created_at DESC, id DESC"
    ))
    .bind(member_id)
    .fetch_all(pool)
    .await
}

/// The member's latest payment by date (plain string order over YYYY-MM-DD),
/// ties broken by latest creation order.
pub async fn latest_payment_for_member(
    pool: &PgPool,
    member_id: &str,
) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as::<_, Payment>(&format!(
        "SELECT {PAYMENT_COLUMNS} FROM payments WHERE member_id = $1
         ORDER BY payment_date DESC, created_at DESC, id DESC
         LIMIT 1"
    ))
    .bind(member_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_payment_by_id(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM payments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Writes every mutable column from the given (already merged) payment.
pub async fn update_payment(pool: &PgPool, payment: &Payment) -> Result<Payment, sqlx::Error> {
    sqlx::query_as::<_, Payment>(&format!(
        "UPDATE payments
         SET amount = $1, payment_date = $2, payment_method = $3, note = $4
         WHERE id = $5
         RETURNING {PAYMENT_COLUMNS}"
    ))
    .bind(payment.amount)
    .bind(&payment.payment_date)
    .bind(&payment.payment_method)
    .bind(&payment.note)
    .bind(payment.id)
    .fetch_one(pool)
    .await
}

pub async fn list_payments_with_members(
    pool: &PgPool,
) -> Result<Vec<PaymentWithMember>, sqlx::Error> {
    let rows = sqlx::query(
        r#"SELECT p.id, p.member_ref, p.member_id, p.amount, p.payment_date, p.payment_method,
                  p.note, p.created_at,
                  m.id AS m_id, m.member_id AS m_member_id, m.name AS m_name, m.phone AS m_phone,
                  m.email AS m_email, m.join_date AS m_join_date,
                  m.membership_plan AS m_membership_plan, m.status AS m_status,
                  m.last_payment_date AS m_last_payment_date, m.next_due_date AS m_next_due_date,
                  m.created_at AS m_created_at, m.updated_at AS m_updated_at
           FROM payments p
           LEFT JOIN members m ON m.id = p.member_ref
           ORDER BY p.created_at DESC, p.id DESC"#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| {
            let member = r
                .get::<Option<i32>, _>("m_id")
                .map(|m_id| Member {
                    id: m_id,
                    member_id: r.get("m_member_id"),
                    name: r.get("m_name"),
                    phone: r.get("m_phone"),
                    email: r.get("m_email"),
                    join_date: r.get("m_join_date"),
                    membership_plan: r.get("m_membership_plan"),
                    status: r.get("m_status"),
                    last_payment_date: r.get("m_last_payment_date"),
                    next_due_date: r.get("m_next_due_date"),
                    created_at: r.get("m_created_at"),
                    updated_at: r.get("m_updated_at"),
                });

            PaymentWithMember {
                id: r.get("id"),
                member,
                member_id: r.get("member_id"),
                amount: r.get("amount"),
                payment_date: r.get("payment_date"),
                payment_method: r.get("payment_method"),
                note: r.get("note"),
                created_at: r.get("created_at"),
            }
        })
        .collect())
}

/// Sum and count of payments whose payment_date starts with "{month}-".
/// The stored date is treated as an opaque string, so a malformed date that
/// happens to match the prefix is counted.
pub async fn monthly_summary(pool: &PgPool, month: &str) -> Result<(f64, i64), sqlx::Error> {
    let row = sqlx::query(
        r#"SELECT COALESCE(SUM(amount), 0) AS total, COUNT(*) AS cnt
           FROM payments
           WHERE payment_date LIKE $1"#,
    )
    .bind(format!("{month}-%"))
    .fetch_one(pool)
    .await?;

    Ok((row.get::<f64, _>("total"), row.get::<i64, _>("cnt")))
}
