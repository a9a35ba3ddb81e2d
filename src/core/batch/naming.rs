//! Pattern based renaming

use chrono::{Local, NaiveDate};

/// Placeholders recognized in rename patterns
pub const PLACEHOLDERS: [&str; 5] = [
    "{numero}",
    "{orden}",
    "{nombre_original}",
    "{fecha}",
    "{proyecto}",
];

/// Values shared by every name rendered in one pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingContext {
    /// Display name of the selected project
    pub project_name: String,
    pub date: NaiveDate,
}

impl NamingContext {
    pub fn new(project_name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            project_name: project_name.into(),
            date,
        }
    }

    /// Context dated with the local current date
    pub fn today(project_name: impl Into<String>) -> Self {
        Self::new(project_name, Local::now().date_naive())
    }
}

/// Drop the last extension: `acta.final.pdf` -> `acta.final`
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() && !name[idx + 1..].contains('/') => &name[..idx],
        _ => name,
    }
}

/// Render `pattern` for the document at 1-based `position`.
///
/// Each placeholder is substituted at its first occurrence only; anything
/// unrecognized is kept verbatim. The result always ends in `.pdf`.
pub fn render_name(
    pattern: &str,
    position: usize,
    baseline_name: &str,
    context: &NamingContext,
) -> String {
    let position = position.to_string();
    let date = context.date.format("%Y-%m-%d").to_string();

    let mut name = pattern
        .replacen("{numero}", &position, 1)
        .replacen("{orden}", &position, 1)
        .replacen("{nombre_original}", strip_extension(baseline_name), 1)
        .replacen("{fecha}", &date, 1)
        .replacen("{proyecto}", &context.project_name, 1);

    if !name.to_lowercase().ends_with(".pdf") {
        name.push_str(".pdf");
    }
    name
}
