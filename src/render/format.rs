const PLACEHOLDER: &str = "-";
const PREAMBLE: &str = "> 本文档由CSV自动转换生成，用于AI理解测试用例上下文";

pub(super) fn append_title(out: &mut String, title: &str) {
    out.push_str(&format!("# {title}\n\n"));
    out.push_str(PREAMBLE);
    out.push_str("\n\n");
    append_separator(out);
}

pub(super) fn append_separator(out: &mut String) {
    out.push_str("---\n\n");
}

pub(super) fn append_case_heading(out: &mut String, ordinal: usize, case_id: &str) {
    out.push_str(&format!("## {ordinal}. {case_id}\n\n"));
}

pub(super) fn append_metadata_section(
    out: &mut String,
    module: &str,
    feature: &str,
    priority: &str,
) {
    out.push_str("### 基本信息\n\n");
    out.push_str("| 属性 | 值 |\n|------|----|\n");
    for (label, value) in [("模块", module), ("功能点", feature), ("用例等级", priority)] {
        out.push_str(&format!("| **{label}** | {} |\n", escape_cell(value)));
    }
    out.push('\n');
}

pub(super) fn append_precondition_section(out: &mut String, precondition: &str) {
    if precondition.is_empty() {
        return;
    }
    out.push_str(&format!("### 预置条件\n\n{precondition}\n\n"));
}

/// Append the paired steps table and return how many rows it has.
pub(super) fn append_steps_section(
    out: &mut String,
    steps: &[String],
    expected: &[String],
) -> usize {
    out.push_str("### 测试步骤与预期结果\n\n");
    let row_count = steps.len().max(expected.len());
    if row_count == 0 {
        return 0;
    }
    out.push_str("| 步骤 | 操作 | 预期结果 |\n|:----:|------|----------|\n");
    for idx in 0..row_count {
        let step = steps.get(idx).map(String::as_str).unwrap_or_default();
        let result = expected.get(idx).map(String::as_str).unwrap_or_default();
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            idx + 1,
            escape_cell(step),
            escape_cell(result)
        ));
    }
    out.push('\n');
    row_count
}

/// Make a value safe to place inside a Markdown table cell.
pub(super) fn escape_cell(value: &str) -> String {
    if value.is_empty() {
        return PLACEHOLDER.to_string();
    }
    value
        .replace('|', "\\|")
        .replace('\n', "<br>")
        .trim()
        .to_string()
}
