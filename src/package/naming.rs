use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Slug used when nothing usable survives sanitizing.
pub const DEFAULT_PACKAGE_NAME: &str = "test-package";

fn separator_run() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| Regex::new(r"[\s_]+").expect("regex for slug separators"))
}

fn is_slug_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || ch == '_'
        || ch == '-'
        || ('\u{4e00}'..='\u{9fa5}').contains(&ch)
}

/// File name without its extension, as used for titles and descriptions.
pub fn source_stem(source: &Path) -> String {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Derive a lowercase, hyphenated package name from a source file name.
pub fn package_name(source: &Path) -> String {
    let stem = source_stem(source);
    let hyphenated = separator_run().replace_all(&stem, "-");
    let slug: String = hyphenated
        .chars()
        .filter(|ch| is_slug_char(*ch))
        .collect::<String>()
        .to_lowercase();
    if slug.is_empty() {
        DEFAULT_PACKAGE_NAME.to_string()
    } else {
        slug
    }
}
