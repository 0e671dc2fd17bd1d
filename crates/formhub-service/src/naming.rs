use formhub_core::error::AppError;
use formhub_core::result::AppResult;

/// Trim a folder or typebot name, rejecting blanks.
pub(crate) fn clean_name(name: &str, what: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{what} name cannot be empty")));
    }
    Ok(trimmed.to_string())
}
