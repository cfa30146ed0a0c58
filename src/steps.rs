use regex::Regex;
use std::sync::OnceLock;

fn enumeration_prefix() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| Regex::new(r"^\d+[、.）)\s]+").expect("regex for step enumeration"))
}

/// Split a multi-line steps field into entries, dropping `1.`-style numbering.
///
/// Only the first enumeration prefix of a line is removed; blank lines and
/// lines that are nothing but a number are dropped.
pub fn split_steps(text: &str) -> Vec<String> {
    let prefix = enumeration_prefix();
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| prefix.replace(line, "").trim().to_string())
        .filter(|step| !step.is_empty())
        .collect()
}
