use serde::Serialize;

/// Generated code ready to be copied or saved to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedFile {
    pub filename: String,
    pub content: String,
}

/// Derive the download filename from the prompt
///
/// Lowercases the prompt and replaces every single space with a hyphen, then
/// appends `.py`. Consecutive spaces yield consecutive hyphens.
pub fn export_filename(prompt: &str) -> String {
    format!("{}.py", prompt.to_lowercase().split(' ').collect::<Vec<_>>().join("-"))
}

/// Build the exported file for the current generation result
///
/// Returns `None` when there is no code to export. The content is kept verbatim.
pub fn export_generated_code(prompt: &str, code: &str) -> Option<ExportedFile> {
    if code.is_empty() {
        return None;
    }

    Some(ExportedFile {
        filename: export_filename(prompt),
        content: code.to_string(),
    })
}
