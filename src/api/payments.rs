// src/api/payments.rs

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::dues::{self, Recompute};
use crate::error::ApiError;
use crate::{db, AppState};

pub const PAYMENT_METHODS: [&str; 4] = ["Cash", "UPI", "Card", "NetBanking"];

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub member_id: Option<String>,
    pub amount: Option<f64>,
    pub payment_date: Option<String>,
    pub payment_method: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentRequest {
    pub amount: Option<f64>,
    pub payment_date: Option<String>,
    pub payment_method: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthQuery {
    /// YYYY-MM; defaults to the current calendar month.
    pub month: Option<String>,
}

fn check_method(method: &str) -> Result<(), ApiError> {
    if PAYMENT_METHODS.contains(&method) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "paymentMethod must be one of: {}",
            PAYMENT_METHODS.join(", ")
        )))
    }
}

fn check_amount(amount: f64) -> Result<(), ApiError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(ApiError::Validation(
            "amount must be a non-negative number".to_string(),
        ))
    }
}

#[utoipa::path(
    context_path = "/payments",
    tag = "payments",
    responses(
        (status = 201, description = "Payment recorded, member due dates advanced"),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "Member not found; no payment is created")
    )
)]
#[post("")]
pub async fn create_payment(
    state: web::Data<AppState>,
    payload: web::Json<CreatePaymentRequest>,
) -> Result<HttpResponse, ApiError> {
    let p = payload.into_inner();

    let (Some(member_id), Some(amount), Some(payment_date)) =
        (p.member_id, p.amount, p.payment_date)
    else {
        return Err(ApiError::Validation(
            "Send all required fields: memberId, amount, paymentDate".to_string(),
        ));
    };

    check_amount(amount)?;
    let method = p.payment_method.unwrap_or_else(|| "Cash".to_string());
    check_method(&method)?;
    let note = p.note.unwrap_or_default();

    let member = db::find_member_by_member_id(&state.pool, &member_id)
        .await?
        .ok_or(ApiError::NotFound("Member"))?;

    let payment = db::insert_payment(
        &state.pool,
        &db::NewPayment {
            member_ref: member.id,
            member_id: &member.member_id,
            amount,
            payment_date: &payment_date,
            payment_method: &method,
            note: &note,
        },
    )
    .await?;

    // Two separate writes: if the member update fails here the payment row
    // stays and the error surfaces for the caller to retry.
    let dues = dues::advance_member_dues(&state.pool, &member, &payment_date).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Payment added successfully",
        "payment": payment,
        "memberUpdated": {
            "memberId": member.member_id,
            "lastPaymentDate": dues.last_payment_date,
            "nextDueDate": dues.next_due_date,
        }
    })))
}

#[get("")]
pub async fn list_payments(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let payments = db::list_payments_with_members(&state.pool).await?;
    Ok(HttpResponse::Ok().json(json!({ "count": payments.len(), "data": payments })))
}

#[get("/member/id/{id}")]
pub async fn list_payments_by_member_ref(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let payments = db::list_payments_by_member_ref(&state.pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "count": payments.len(), "data": payments })))
}

#[get("/member/memberid/{member_id}")]
pub async fn list_payments_by_member_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let payments = db::list_payments_by_member_id(&state.pool, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "count": payments.len(), "data": payments })))
}

#[utoipa::path(
    context_path = "/payments",
    tag = "payments",
    params(MonthQuery),
    responses((status = 200, description = "Sum and count of the month's payments"))
)]
#[get("/summary/monthly")]
pub async fn monthly_summary(
    state: web::Data<AppState>,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse, ApiError> {
    let month = query
        .into_inner()
        .month
        .unwrap_or_else(|| Utc::now().format("%Y-%m").to_string());

    let (total, count) = db::monthly_summary(&state.pool, &month).await?;

    Ok(HttpResponse::Ok().json(json!({
        "month": month,
        "totalCollected": total,
        "totalPayments": count,
    })))
}

/// Edits a payment in place. Does not re-derive the member's due dates,
/// even when paymentDate changes; the next payment create or delete
/// recomputes them.
#[put("/{id}")]
pub async fn update_payment(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    payload: web::Json<UpdatePaymentRequest>,
) -> Result<HttpResponse, ApiError> {
    let mut payment = db::find_payment_by_id(&state.pool, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Payment"))?;

    let p = payload.into_inner();

    if let Some(amount) = p.amount {
        check_amount(amount)?;
        payment.amount = amount;
    }
    if let Some(method) = p.payment_method {
        check_method(&method)?;
        payment.payment_method = method;
    }
    if let Some(payment_date) = p.payment_date {
        payment.payment_date = payment_date;
    }
    if let Some(note) = p.note {
        payment.note = note;
    }

    let updated = db::update_payment(&state.pool, &payment).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Payment updated successfully",
        "payment": updated,
    })))
}

#[utoipa::path(
    context_path = "/payments",
    tag = "payments",
    params(("id" = i32, Path, description = "Payment storage id")),
    responses(
        (status = 200, description = "Payment deleted; member dates recomputed, cleared, \
                                      or left alone when the member is gone"),
        (status = 404, description = "Payment not found")
    )
)]
#[delete("/id/{id}")]
pub async fn delete_payment(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let payment = db::find_payment_by_id(&state.pool, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Payment"))?;

    db::delete_payment_by_id(&state.pool, payment.id).await?;

    // The deletion itself already succeeded; everything below is the
    // recompute step and a missing member only downgrades the response.
    match dues::recompute_member_dues(&state.pool, &payment.member_id).await? {
        Recompute::MemberMissing => Ok(HttpResponse::Ok().json(json!({
            "message": "Payment deleted, but Member not found to update due date"
        }))),
        Recompute::Cleared => Ok(HttpResponse::Ok().json(json!({
            "message": "Payment deleted and member due dates cleared"
        }))),
        Recompute::Updated(dues) => Ok(HttpResponse::Ok().json(json!({
            "message": "Payment deleted and member due date updated",
            "memberUpdated": {
                "memberId": payment.member_id,
                "lastPaymentDate": dues.last_payment_date,
                "nextDueDate": dues.next_due_date,
            }
        }))),
    }
}
