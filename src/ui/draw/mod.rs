//! UI drawing module
//!
//! - `components`: header, endpoint bar, status line, footer
//! - `panels`: payload editor and result panel
//! - `result`: projection of the audit report into display rows
//! - `styling`: color schemes and style constants

mod components;
mod panels;
mod result;
mod styling;

pub use components::{render_endpoint_bar, render_footer, render_header, render_status_line};
pub use panels::{render_editor_panel, render_result_panel};
pub use result::{outcome_rows, report_text};
