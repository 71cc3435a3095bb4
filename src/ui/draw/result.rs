//! Audit report projection
//!
//! Turns the service report into display rows. Every figure is shown exactly
//! as the service sent it; nothing is computed here.

use crate::types::{
    AuditResult, FIELD_ESCAPE_RATE, FIELD_NEAR_MISS, FIELD_QA_LLM, FIELD_QA_MANUAL,
    FIELD_WORKLOAD_REDUCTION,
};
use serde_json::{Number, Value};

pub const RESULT_TITLE: &str = "Hasil Outcome";
pub const INCONSISTENCY_TITLE: &str = "Inconsistency Detail";

/// The five outcome rows, in display order
pub fn outcome_rows(result: &AuditResult) -> Vec<String> {
    let show = |name: &str| display_value(result.field(name));

    vec![
        format!("Near miss terdeteksi: {}", show(FIELD_NEAR_MISS)),
        format!("Waktu QA manual: {} menit", show(FIELD_QA_MANUAL)),
        format!("Waktu QA dengan LLM: {} menit", show(FIELD_QA_LLM)),
        format!("Escape rate: {}", show(FIELD_ESCAPE_RATE)),
        format!("Penurunan beban kerja tim: {}%", show(FIELD_WORKLOAD_REDUCTION)),
    ]
}

/// Pretty-printed inconsistency detail, empty when the service sent none
pub fn inconsistency_dump(result: &AuditResult) -> String {
    result
        .inconsistencies()
        .and_then(|detail| serde_json::to_string_pretty(detail).ok())
        .unwrap_or_default()
}

/// Plain-text report as displayed, for the clipboard
pub fn report_text(result: &AuditResult) -> String {
    let mut text = outcome_rows(result).join("\n");
    text.push_str("\n\n");
    text.push_str(INCONSISTENCY_TITLE);
    text.push('\n');
    text.push_str(&inconsistency_dump(result));
    text
}

/// Render a single field; missing and null fields render as nothing
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => display_number(n),
        Some(other) => other.to_string(),
    }
}

// Numbers keep the service's own text; only an all-zero fraction is
// dropped, so "28.0" shows as "28"
fn display_number(n: &Number) -> String {
    let text = n.to_string();
    match text.split_once('.') {
        Some((whole, fraction)) if !fraction.is_empty() && fraction.bytes().all(|b| b == b'0') => {
            whole.to_string()
        }
        _ => text,
    }
}
