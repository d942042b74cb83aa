use actix_web::web;

pub mod members;
pub mod payments;

/// Registers the full route tree; shared by main and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/members")
            .service(members::create_member)
            .service(members::list_members)
            .service(members::filter_members)
            .service(members::search_members)
            .service(members::get_member_by_id)
            .service(members::get_member_by_member_id)
            .service(members::update_member_by_id)
            .service(members::update_member_by_member_id)
            .service(members::delete_member_by_id)
            .service(members::delete_member_by_member_id),
    )
    .service(
        web::scope("/payments")
            .service(payments::create_payment)
            .service(payments::list_payments)
            .service(payments::list_payments_by_member_ref)
            .service(payments::list_payments_by_member_id)
            .service(payments::monthly_summary)
            .service(payments::delete_payment)
            .service(payments::update_payment),
    );
}
