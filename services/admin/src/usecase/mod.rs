pub mod auth;
pub mod menu;
pub mod permission;
pub mod role;
pub mod user;

use yiya_domain::status::Status;

use crate::error::AdminServiceError;

/// Parse a 0/1 status field.
pub(crate) fn parse_status(value: i32) -> Result<Status, AdminServiceError> {
    Status::from_i32(value).ok_or_else(|| {
        AdminServiceError::invalid_input(format!("status must be 0 or 1, got {value}"))
    })
}

/// Reject blank or over-long required text.
pub(crate) fn require_text(field: &str, value: &str, max: usize) -> Result<(), AdminServiceError> {
    let len = value.trim().chars().count();
    if len == 0 || value.chars().count() > max {
        return Err(AdminServiceError::invalid_input(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(())
}
