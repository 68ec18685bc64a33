//! Building permit with structure details from the form answers.

use permit_entity::DetailedPermit;

use super::layout::{Page, form_value, long_date};

pub(super) fn render(permit: &DetailedPermit, applicant: &str) -> String {
    let approved = long_date(permit.approved_at);
    let scope = form_value(permit, "scope_of_work");
    let occupancy = form_value(permit, "occupancy");
    let floor_area = form_value(permit, "floor_area");

    let mut page = Page::new("BUILDING PERMIT", permit);
    page.section("Owner")
        .row("Owner / Applicant", Some(applicant))
        .row("Address", permit.applicant_address.as_deref())
        .row("Contact No.", permit.applicant_phone.as_deref());
    page.section("Project")
        .row("Project Location", permit.permit.address.as_deref())
        .row("Scope of Work", scope.as_deref())
        .row("Use or Character of Occupancy", occupancy.as_deref())
        .row("Total Floor Area", floor_area.as_deref())
        .row("Purpose", permit.purpose.as_deref());
    page.section("Approval")
        .row("Date Issued", approved.as_deref());
    page.finish("Municipal Building Official")
}
