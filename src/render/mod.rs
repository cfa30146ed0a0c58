//! Deterministic Markdown renderer for classified test cases.
//!
//! Output depends only on the title and the record order, so re-running a
//! conversion produces byte-identical documents.

use crate::classify::{
    Record, KEY_EXPECTED, KEY_FEATURE, KEY_ID, KEY_MODULE, KEY_PRECONDITION, KEY_PRIORITY,
    KEY_STEPS,
};
use crate::steps::split_steps;
use serde::Serialize;

mod format;

use format::{
    append_case_heading, append_metadata_section, append_precondition_section,
    append_separator, append_steps_section, append_title,
};

/// Rendering summary reported per converted file.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub cases: usize,
    pub step_rows: usize,
    pub cases_without_steps: usize,
}

/// Rendered document text plus counts gathered while rendering.
pub struct RenderedDocument {
    pub markdown: String,
    pub summary: RenderSummary,
}

/// Render all records into one Markdown document under `title`.
pub fn render_document(title: &str, records: &[Record]) -> RenderedDocument {
    let mut out = String::new();
    let mut summary = RenderSummary {
        cases: records.len(),
        ..RenderSummary::default()
    };

    append_title(&mut out, title);
    for (idx, record) in records.iter().enumerate() {
        let ordinal = idx + 1;
        let case_id = match record.get(KEY_ID) {
            "" => format!("Case_{ordinal}"),
            id => id.to_string(),
        };
        append_case_heading(&mut out, ordinal, &case_id);
        append_metadata_section(
            &mut out,
            record.get(KEY_MODULE),
            record.get(KEY_FEATURE),
            record.get(KEY_PRIORITY),
        );
        append_precondition_section(&mut out, record.get(KEY_PRECONDITION));

        let steps = split_steps(record.get(KEY_STEPS));
        let expected = split_steps(record.get(KEY_EXPECTED));
        let rows = append_steps_section(&mut out, &steps, &expected);
        summary.step_rows += rows;
        if rows == 0 {
            summary.cases_without_steps += 1;
        }
        append_separator(&mut out);
    }

    RenderedDocument {
        markdown: out,
        summary,
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
