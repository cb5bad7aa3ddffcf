use validator::ValidationErrors;

/// Joins the messages of every field error into a single `; `-separated string.
///
/// Errors without a custom message fall back to their code.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
