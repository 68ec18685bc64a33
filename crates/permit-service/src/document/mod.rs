//! Printable permit documents.
//!
//! Rendering is a pure function of the detailed permit. The template is
//! chosen by [`PermitFamily`], never by inspecting the slug here.

mod building;
mod business;
mod escape;
mod generic;
mod layout;
mod motorela;

use permit_entity::{DetailedPermit, Permit, PermitFamily};

pub use escape::escape_html;

/// Render a self-contained HTML document for `permit`.
pub fn render_document(permit: &DetailedPermit) -> String {
    let applicant = match permit.permit.applicant_full_name() {
        name if name.is_empty() => "Applicant".to_string(),
        name => name,
    };
    match permit.family() {
        PermitFamily::Business => business::render(permit, &applicant),
        PermitFamily::Building => building::render(permit, &applicant),
        PermitFamily::Motorela => motorela::render(permit, &applicant),
        PermitFamily::Generic => generic::render(permit, &applicant),
    }
}

/// Download name: `{slugified type title}-{8-char id prefix}.html`.
pub fn download_filename(permit: &Permit) -> String {
    let title = permit.permit_type_title().unwrap_or("permit");
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    let slug = if slug.is_empty() { "permit" } else { slug };
    format!("{slug}-{}.html", permit.id.short_prefix())
}
