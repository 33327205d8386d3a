//! Permission checks over a [`ResolvedUser`].
//!
//! The evaluator is pure: it never touches storage and never fails. Turning a
//! `false` into a 403 is the caller's job (see `handlers::guard`).

use std::collections::BTreeSet;

use yiya_domain::permission::SUPER_ADMIN_ROLE_CODE;

use crate::domain::types::ResolvedUser;

#[derive(Debug, Clone)]
pub struct AccessEvaluator {
    super_admin_code: String,
}

impl Default for AccessEvaluator {
    fn default() -> Self {
        Self::new(SUPER_ADMIN_ROLE_CODE)
    }
}

impl AccessEvaluator {
    /// `super_admin_code` is the role code that grants universal access.
    pub fn new(super_admin_code: impl Into<String>) -> Self {
        Self {
            super_admin_code: super_admin_code.into(),
        }
    }

    pub fn super_admin_code(&self) -> &str {
        &self.super_admin_code
    }

    /// True iff any role carries the super-admin code. Role status is ignored.
    pub fn is_super_admin(&self, user: &ResolvedUser) -> bool {
        user.roles.iter().any(|r| r.code == self.super_admin_code)
    }

    /// Union of permission codes over all roles.
    pub fn effective_permissions<'a>(&self, user: &'a ResolvedUser) -> BTreeSet<&'a str> {
        user.roles
            .iter()
            .flat_map(|r| r.permissions.iter().map(String::as_str))
            .collect()
    }

    pub fn has_permission(&self, user: &ResolvedUser, code: &str) -> bool {
        if self.is_super_admin(user) {
            return true;
        }
        user.roles
            .iter()
            .any(|r| r.permissions.iter().any(|p| p == code))
    }

    /// An empty `codes` list yields `false` for everyone but super-admins.
    pub fn has_any_permission(&self, user: &ResolvedUser, codes: &[&str]) -> bool {
        if self.is_super_admin(user) {
            return true;
        }
        let granted = self.effective_permissions(user);
        codes.iter().any(|c| granted.contains(c))
    }

    /// An empty `codes` list yields `true` for everyone.
    pub fn has_all_permissions(&self, user: &ResolvedUser, codes: &[&str]) -> bool {
        if self.is_super_admin(user) {
            return true;
        }
        let granted = self.effective_permissions(user);
        codes.iter().all(|c| granted.contains(c))
    }

    /// Codes from `codes` the user lacks, in input order.
    pub fn missing_permissions<'c>(&self, user: &ResolvedUser, codes: &[&'c str]) -> Vec<&'c str> {
        if self.is_super_admin(user) {
            return Vec::new();
        }
        let granted = self.effective_permissions(user);
        codes
            .iter()
            .copied()
            .filter(|c| !granted.contains(c))
            .collect()
    }
}
