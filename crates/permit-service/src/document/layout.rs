//! Shared page skeleton for permit documents.

use chrono::{DateTime, Utc};

use permit_entity::DetailedPermit;

use super::escape::escape_html;

const STYLE: &str = "\
body{font-family:Georgia,serif;margin:40px;color:#111}\
.header{text-align:center;border-bottom:3px double #111;padding-bottom:12px}\
.header h1{margin:4px 0;font-size:26px;letter-spacing:2px}\
.header p{margin:2px 0;font-size:13px}\
.control{text-align:right;font-size:12px;margin-top:8px}\
table{width:100%;border-collapse:collapse;margin-top:20px}\
td{padding:6px 8px;border-bottom:1px solid #ccc;vertical-align:top}\
td.label{width:35%;font-weight:bold}\
h2{font-size:16px;margin-top:28px;border-bottom:1px solid #111}\
.signature{margin-top:60px;text-align:right}\
.signature span{display:inline-block;border-top:1px solid #111;padding-top:4px;min-width:240px;text-align:center}\
@media print{body{margin:10mm}}";

const NOT_PROVIDED: &str = "N/A";

/// Incrementally built document body.
pub(super) struct Page {
    heading: String,
    body: String,
}

impl Page {
    pub(super) fn new(heading: &str, permit: &DetailedPermit) -> Self {
        let mut page = Self {
            heading: heading.to_string(),
            body: String::new(),
        };
        page.body.push_str(&format!(
            "<div class=\"control\">Control No. {}</div>",
            escape_html(&permit.permit.id.short_prefix().to_uppercase())
        ));
        page
    }

    pub(super) fn section(&mut self, title: &str) -> &mut Self {
        self.close_table();
        self.body
            .push_str(&format!("<h2>{}</h2><table>", escape_html(title)));
        self
    }

    pub(super) fn row(&mut self, label: &str, value: Option<&str>) -> &mut Self {
        let value = value.filter(|v| !v.trim().is_empty()).unwrap_or(NOT_PROVIDED);
        self.body.push_str(&format!(
            "<tr><td class=\"label\">{}</td><td>{}</td></tr>",
            escape_html(label),
            escape_html(value)
        ));
        self
    }

    pub(super) fn finish(mut self, signatory: &str) -> String {
        self.close_table();
        format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title>\
             <style>{STYLE}</style></head><body>\
             <div class=\"header\"><p>Republic of the Philippines</p>\
             <p>Office of the Municipal Mayor</p><h1>{title}</h1></div>\
             {body}\
             <div class=\"signature\"><span>{signatory}</span></div>\
             </body></html>",
            title = escape_html(&self.heading),
            body = self.body,
            signatory = escape_html(signatory),
        )
    }

    fn close_table(&mut self) {
        if self.body.ends_with("</tr>") || self.body.ends_with("<table>") {
            self.body.push_str("</table>");
        }
    }
}

/// Long-form date, or `None` when absent.
pub(super) fn long_date(at: Option<DateTime<Utc>>) -> Option<String> {
    at.map(|t| t.format("%B %d, %Y").to_string())
}

/// A scalar answer from the permit's extra form data.
pub(super) fn form_value(permit: &DetailedPermit, key: &str) -> Option<String> {
    match permit.form_data.get(key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_string()),
        _ => None,
    }
}
