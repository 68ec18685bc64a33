//! Mayor's permit for a business establishment.

use permit_entity::DetailedPermit;

use super::layout::{Page, form_value, long_date};

pub(super) fn render(permit: &DetailedPermit, applicant: &str) -> String {
    let approved = long_date(permit.approved_at);
    let line_of_business = form_value(permit, "line_of_business");

    let mut page = Page::new("BUSINESS PERMIT", permit);
    page.section("Business")
        .row("Business Name", permit.business_name.as_deref())
        .row("Business Address", permit.permit.address.as_deref())
        .row("Line of Business", line_of_business.as_deref())
        .row("Purpose", permit.purpose.as_deref());
    page.section("Owner")
        .row("Owner / Operator", Some(applicant))
        .row("Email", permit.applicant_email.as_deref())
        .row("Contact No.", permit.applicant_phone.as_deref());
    page.section("Validity")
        .row("Date Approved", approved.as_deref());
    page.finish("Municipal Mayor")
}
