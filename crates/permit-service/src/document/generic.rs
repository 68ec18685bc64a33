//! Fallback certificate for permit types without a dedicated layout.

use permit_entity::DetailedPermit;

use super::layout::{Page, long_date};

pub(super) fn render(permit: &DetailedPermit, applicant: &str) -> String {
    let approved = long_date(permit.approved_at);
    let submitted = long_date(Some(permit.permit.created_at));

    let mut page = Page::new("PERMIT CERTIFICATE", permit);
    page.section("Permit")
        .row("Permit Type", permit.permit.permit_type_title())
        .row("Purpose", permit.purpose.as_deref())
        .row("Address", permit.permit.address.as_deref());
    page.section("Applicant")
        .row("Name", Some(applicant))
        .row("Email", permit.applicant_email.as_deref())
        .row("Contact No.", permit.applicant_phone.as_deref());
    page.section("Dates")
        .row("Date Submitted", submitted.as_deref())
        .row("Date Approved", approved.as_deref());
    page.finish("Authorized Officer")
}
