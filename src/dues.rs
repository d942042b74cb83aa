// src/dues.rs

use chrono::{Months, NaiveDate};
use sqlx::PgPool;

use crate::db;
use crate::models::Member;

/// Months of membership one payment buys on the given plan.
/// Unrecognized plans fall back to one month instead of failing.
pub fn plan_months(plan: &str) -> u32 {
    match plan {
        "Monthly" => 1,
        "Quarterly" => 3,
        "Half-Yearly" => 6,
        "Yearly" => 12,
        _ => 1,
    }
}

/// Adds whole calendar months to a `YYYY-MM-DD` date string, carrying year
/// overflow and clamping a nonexistent day to the end of the target month
/// (Jan 31 + 1 month = Feb 29 in a leap year).
///
/// Returns "" when the input does not parse; callers treat empty as
/// "could not compute".
pub fn rollforward(date: &str, months: u32) -> String {
    let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return String::new();
    };

    match parsed.checked_add_months(Months::new(months)) {
        Some(advanced) => advanced.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// A member's derived payment-date fields.
#[derive(Debug)]
pub struct DueDates {
    pub last_payment_date: String,
    pub next_due_date: String,
}

/// Outcome of recomputing a member's dates after a payment deletion.
#[derive(Debug)]
pub enum Recompute {
    /// Dates now follow the latest remaining payment.
    Updated(DueDates),
    /// No payments remain; both fields were cleared.
    Cleared,
    /// The owning member no longer exists; nothing to update.
    MemberMissing,
}

/// Advances a member's dates after a new payment was recorded.
///
/// The payment date is taken as given: a backdated payment still overwrites
/// the stored dates, and any manual next_due_date edit is overwritten too.
pub async fn advance_member_dues(
    pool: &PgPool,
    member: &Member,
    payment_date: &str,
) -> Result<DueDates, sqlx::Error> {
    let dues = DueDates {
        last_payment_date: payment_date.to_string(),
        next_due_date: rollforward(payment_date, plan_months(&member.membership_plan)),
    };
    write_member_dues(pool, member.id, &dues).await?;
    Ok(dues)
}

/// Recomputes a member's dates from the latest remaining payment, clearing
/// them when none remain. The result depends only on the current payment
/// set, so running it again changes nothing.
pub async fn recompute_member_dues(
    pool: &PgPool,
    member_id: &str,
) -> Result<Recompute, sqlx::Error> {
    let Some(member) = db::find_member_by_member_id(pool, member_id).await? else {
        return Ok(Recompute::MemberMissing);
    };

    match db::latest_payment_for_member(pool, member_id).await? {
        Some(latest) => {
            let dues = DueDates {
                last_payment_date: latest.payment_date.clone(),
                next_due_date: rollforward(
                    &latest.payment_date,
                    plan_months(&member.membership_plan),
                ),
            };
            write_member_dues(pool, member.id, &dues).await?;
            Ok(Recompute::Updated(dues))
        }
        None => {
            let cleared = DueDates {
                last_payment_date: String::new(),
                next_due_date: String::new(),
            };
            write_member_dues(pool, member.id, &cleared).await?;
            Ok(Recompute::Cleared)
        }
    }
}

async fn write_member_dues(pool: &PgPool, id: i32, dues: &DueDates) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"UPDATE members
           SET last_payment_date = $1, next_due_date = $2, updated_at = now()
           WHERE id = $3"#,
    )
    .bind(&dues.last_payment_date)
    .bind(&dues.next_due_date)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}
