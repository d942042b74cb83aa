// src/api/members.rs

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::Member;
use crate::{db, AppState};

pub const MEMBERSHIP_PLANS: [&str; 4] = ["Monthly", "Quarterly", "Half-Yearly", "Yearly"];
pub const MEMBER_STATUSES: [&str; 2] = ["Active", "Inactive"];

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub member_id: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub join_date: Option<String>,
    pub membership_plan: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub join_date: Option<String>,
    pub membership_plan: Option<String>,
    pub status: Option<String>,
    /// Manual override path: stored verbatim, no re-derivation. The next
    /// payment create/delete recompute overwrites whatever is set here.
    pub last_payment_date: Option<String>,
    pub next_due_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    pub status: Option<String>,
    #[serde(rename = "membershipPlan")]
    pub membership_plan: Option<String>,
}

fn check_plan(plan: &str) -> Result<(), ApiError> {
    if MEMBERSHIP_PLANS.contains(&plan) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "membershipPlan must be one of: {}",
            MEMBERSHIP_PLANS.join(", ")
        )))
    }
}

fn check_status(status: &str) -> Result<(), ApiError> {
    if MEMBER_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "status must be one of: {}",
            MEMBER_STATUSES.join(", ")
        )))
    }
}

#[utoipa::path(
    context_path = "/members",
    tag = "members",
    responses(
        (status = 201, description = "Member created", body = Member),
        (status = 400, description = "Missing or invalid fields, or duplicate memberId")
    )
)]
#[post("")]
pub async fn create_member(
    state: web::Data<AppState>,
    payload: web::Json<CreateMemberRequest>,
) -> Result<HttpResponse, ApiError> {
    let p = payload.into_inner();

    let (Some(member_id), Some(name), Some(phone), Some(email), Some(join_date), Some(plan)) = (
        p.member_id,
        p.name,
        p.phone,
        p.email,
        p.join_date,
        p.membership_plan,
    ) else {
        return Err(ApiError::Validation(
            "Send all required fields: memberId, name, phone, email, joinDate, membershipPlan"
                .to_string(),
        ));
    };

    check_plan(&plan)?;
    let status = p.status.unwrap_or_else(|| "Active".to_string());
    check_status(&status)?;

    if db::find_member_by_member_id(&state.pool, &member_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Validation("MemberId already exists".to_string()));
    }

    let member = db::insert_member(
        &state.pool,
        &db::NewMember {
            member_id: &member_id,
            name: &name,
            phone: &phone,
            email: &email,
            join_date: &join_date,
            membership_plan: &plan,
            status: &status,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(member))
}

#[utoipa::path(
    context_path = "/members",
    tag = "members",
    responses((status = 200, description = "All members, newest first"))
)]
#[get("")]
pub async fn list_members(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let members = db::list_members(&state.pool).await?;
    Ok(HttpResponse::Ok().json(json!({ "count": members.len(), "data": members })))
}

#[get("/filter")]
pub async fn filter_members(
    state: web::Data<AppState>,
    query: web::Query<FilterQuery>,
) -> Result<HttpResponse, ApiError> {
    let members = db::filter_members(
        &state.pool,
        query.status.as_deref(),
        query.membership_plan.as_deref(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "count": members.len(), "data": members })))
}

#[get("/search/{key}")]
pub async fn search_members(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let members = db::search_members(&state.pool, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "count": members.len(), "data": members })))
}

#[get("/id/{id}")]
pub async fn get_member_by_id(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let member = db::find_member_by_id(&state.pool, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Member"))?;
    Ok(HttpResponse::Ok().json(member))
}

#[get("/memberid/{member_id}")]
pub async fn get_member_by_member_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let member = db::find_member_by_member_id(&state.pool, &path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Member"))?;
    Ok(HttpResponse::Ok().json(member))
}

async fn apply_member_update(
    state: &AppState,
    mut member: Member,
    p: UpdateMemberRequest,
) -> Result<HttpResponse, ApiError> {
    if let Some(plan) = &p.membership_plan {
        check_plan(plan)?;
    }
    if let Some(status) = &p.status {
        check_status(status)?;
    }

    if let Some(name) = p.name {
        member.name = name;
    }
    if let Some(phone) = p.phone {
        member.phone = phone;
    }
    if let Some(email) = p.email {
        member.email = email;
    }
    if let Some(join_date) = p.join_date {
        member.join_date = join_date;
    }
    if let Some(plan) = p.membership_plan {
        member.membership_plan = plan;
    }
    if let Some(status) = p.status {
        member.status = status;
    }
    if let Some(last_payment_date) = p.last_payment_date {
        member.last_payment_date = last_payment_date;
    }
    if let Some(next_due_date) = p.next_due_date {
        member.next_due_date = next_due_date;
    }

    let updated = db::update_member(&state.pool, &member).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Member updated successfully", "data": updated })))
}

#[put("/id/{id}")]
pub async fn update_member_by_id(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateMemberRequest>,
) -> Result<HttpResponse, ApiError> {
    let member = db::find_member_by_id(&state.pool, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Member"))?;
    apply_member_update(&state, member, payload.into_inner()).await
}

#[put("/memberid/{member_id}")]
pub async fn update_member_by_member_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<UpdateMemberRequest>,
) -> Result<HttpResponse, ApiError> {
    let member = db::find_member_by_member_id(&state.pool, &path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Member"))?;
    apply_member_update(&state, member, payload.into_inner()).await
}

#[delete("/id/{id}")]
pub async fn delete_member_by_id(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    if !db::delete_member_by_id(&state.pool, path.into_inner()).await? {
        return Err(ApiError::NotFound("Member"));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Member deleted successfully" })))
}

#[delete("/memberid/{member_id}")]
pub async fn delete_member_by_member_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    if !db::delete_member_by_member_id(&state.pool, &path.into_inner()).await? {
        return Err(ApiError::NotFound("Member"));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Member deleted successfully" })))
}
