//! Route guards: turn a negative access answer into a 403 that names what was
//! missing.

use crate::domain::access::AccessEvaluator;
use crate::domain::types::ResolvedUser;
use crate::error::AdminServiceError;

pub fn require_perm(
    evaluator: &AccessEvaluator,
    user: &ResolvedUser,
    code: &str,
) -> Result<(), AdminServiceError> {
    if evaluator.has_permission(user, code) {
        return Ok(());
    }
    Err(AdminServiceError::forbidden(&[code]))
}

/// Passes when the user holds at least one of `codes`; the error lists them all.
pub fn require_any_perm(
    evaluator: &AccessEvaluator,
    user: &ResolvedUser,
    codes: &[&str],
) -> Result<(), AdminServiceError> {
    if evaluator.has_any_permission(user, codes) {
        return Ok(());
    }
    Err(AdminServiceError::forbidden(codes))
}

/// Passes when the user holds every code; the error lists only the missing ones.
pub fn require_all_perms(
    evaluator: &AccessEvaluator,
    user: &ResolvedUser,
    codes: &[&str],
) -> Result<(), AdminServiceError> {
    let missing = evaluator.missing_permissions(user, codes);
    if missing.is_empty() {
        return Ok(());
    }
    Err(AdminServiceError::forbidden(&missing))
}

pub fn require_super_admin(
    evaluator: &AccessEvaluator,
    user: &ResolvedUser,
) -> Result<(), AdminServiceError> {
    if evaluator.is_super_admin(user) {
        return Ok(());
    }
    Err(AdminServiceError::SuperAdminRequired)
}
