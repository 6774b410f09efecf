//! Report rendering: CSV and plain-text emission of the pipeline's output
//! shapes. The shapes themselves live with the stages that compute them;
//! this module only serializes.

pub mod csv;
pub mod text;

/// Format a quantity or length without trailing zeros (`2`, `31.5`, `0.75`).
pub(crate) fn fmt_num(value: f64) -> String {
    let text = format!("{:.4}", value);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
