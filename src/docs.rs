use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::members::create_member,
        crate::api::members::list_members,
        crate::api::payments::create_payment,
        crate::api::payments::monthly_summary,
        crate::api::payments::delete_payment
    ),
    components(
        schemas(
            crate::api::members::CreateMemberRequest,
            crate::api::members::UpdateMemberRequest,
            crate::api::payments::CreatePaymentRequest,
            crate::api::payments::UpdatePaymentRequest,
            crate::models::Member,
            crate::models::Payment
        )
    ),
    tags(
        (name = "members", description = "Member management"),
        (name = "payments", description = "Payments and due-date tracking")
    )
)]
pub struct ApiDoc;
