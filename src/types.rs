use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of radiotherapy workflow document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Simulasi,
    Kontur,
    Resep,
    Rencana,
    Delivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Laterality {
    Left,
    Right,
}

/// One workflow document (simulation, prescription, delivery...) for a
/// patient/site/laterality combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub document_type: DocumentType,
    pub patient_id: String,
    pub site: String,
    pub laterality: Laterality,
    pub dose_gy: f64,
    pub fraction_count: u32,
}

/// Document set submitted to the audit service
///
/// Only used to seed the editor. Submission always sends whatever JSON the
/// user typed, so nothing here constrains the payload shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditPayload {
    pub qa_time_manual_minutes: f64,
    pub records: Vec<DocumentRecord>,
}

impl AuditPayload {
    /// Breast case with a laterality mismatch in the prescription and a
    /// dose/fraction mismatch in the delivery record
    pub fn sample() -> Self {
        let record = |document_type, laterality, dose_gy, fraction_count| DocumentRecord {
            document_type,
            patient_id: "RT-001".to_string(),
            site: "breast".to_string(),
            laterality,
            dose_gy,
            fraction_count,
        };

        Self {
            qa_time_manual_minutes: 28.0,
            records: vec![
                record(DocumentType::Simulasi, Laterality::Left, 50.0, 25),
                record(DocumentType::Resep, Laterality::Right, 50.0, 25),
                record(DocumentType::Delivery, Laterality::Left, 48.0, 24),
            ],
        }
    }

    /// Pretty-printed sample, as shown in a fresh editor
    pub fn sample_json() -> String {
        serde_json::to_string_pretty(&Self::sample()).unwrap_or_else(|_| "{}".to_string())
    }
}

pub const FIELD_NEAR_MISS: &str = "near_miss_detected";
pub const FIELD_QA_MANUAL: &str = "qa_time_manual_minutes";
pub const FIELD_QA_LLM: &str = "qa_time_llm_minutes";
pub const FIELD_ESCAPE_RATE: &str = "escape_rate";
pub const FIELD_WORKLOAD_REDUCTION: &str = "team_workload_reduction_percent";
pub const FIELD_INCONSISTENCIES: &str = "inconsistencies";

/// Report returned by the audit service
///
/// Kept as raw JSON: only the named top-level fields are ever read, anything
/// else the service adds passes through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditResult(Value);

impl AuditResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Top-level field by name, `None` when the service omitted it
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn inconsistencies(&self) -> Option<&Value> {
        self.field(FIELD_INCONSISTENCIES)
    }
}

/// Which input area receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Endpoint,
    Editor,
    Result,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Endpoint => Focus::Editor,
            Focus::Editor => Focus::Result,
            Focus::Result => Focus::Endpoint,
        }
    }
}

/// Liveness of the audit service as last probed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Unknown,
    Checking,
    Ok,
    Status(u16),
    Unreachable,
}
