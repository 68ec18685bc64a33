//! Franchise permit for a motorela (passenger tricycle) unit.

use permit_entity::DetailedPermit;

use super::layout::{Page, form_value, long_date};

pub(super) fn render(permit: &DetailedPermit, applicant: &str) -> String {
    let approved = long_date(permit.approved_at);
    let plate = form_value(permit, "plate_number");
    let body_number = form_value(permit, "body_number");
    let route = form_value(permit, "route");

    let mut page = Page::new("MOTORELA FRANCHISE PERMIT", permit);
    page.section("Operator")
        .row("Operator", Some(applicant))
        .row("Address", permit.permit.address.as_deref())
        .row("Contact No.", permit.applicant_phone.as_deref());
    page.section("Unit")
        .row("Plate No.", plate.as_deref())
        .row("Body No.", body_number.as_deref())
        .row("Route", route.as_deref());
    page.section("Franchise")
        .row("Date Granted", approved.as_deref());
    page.finish("Municipal Mayor")
}
