use yiya_auth_types::password::hash_password;
use yiya_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{RoleRepository, UserRepository};
use crate::domain::types::{
    AdminUser, NewUser, UserFilter, UserPatch, dedup_ids, validate_password, validate_username,
};
use crate::error::AdminServiceError;
use crate::usecase::parse_status;

fn hash(password: &str) -> Result<String, AdminServiceError> {
    if !validate_password(password) {
        return Err(AdminServiceError::invalid_input(
            "password must be 6-100 characters",
        ));
    }
    hash_password(password)
        .map_err(|e| AdminServiceError::Internal(anyhow::anyhow!("hash password: {e}")))
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersInput {
    pub page: PageRequest,
    pub username: Option<String>,
    pub real_name: Option<String>,
}

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(
        &self,
        input: ListUsersInput,
    ) -> Result<Page<AdminUser>, AdminServiceError> {
        let page = input.page.clamped();
        let filter = UserFilter {
            username: input.username,
            real_name: input.real_name,
        };
        let (items, total) = self.repo.list(&filter, page).await?;
        Ok(Page {
            items,
            total,
            page: page.page,
            size: page.size,
        })
    }
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub username: String,
    pub password: String,
    pub real_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: i32,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<AdminUser, AdminServiceError> {
        if !validate_username(&input.username) {
            return Err(AdminServiceError::invalid_input(
                "username must be 3-50 characters",
            ));
        }
        let status = parse_status(input.status)?;
        if self.repo.username_taken(&input.username).await? {
            return Err(AdminServiceError::UsernameExists);
        }
        let password_hash = hash(&input.password)?;
        self.repo
            .create(&NewUser {
                username: input.username,
                password_hash,
                real_name: input.real_name,
                phone: input.phone,
                email: input.email,
                status,
            })
            .await
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, id: i64) -> Result<AdminUser, AdminServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AdminServiceError::UserNotFound)
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserInput {
    pub real_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: Option<i32>,
}

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    pub async fn execute(
        &self,
        id: i64,
        input: UpdateUserInput,
    ) -> Result<AdminUser, AdminServiceError> {
        let patch = UserPatch {
            real_name: input.real_name,
            phone: input.phone,
            email: input.email,
            status: input.status.map(parse_status).transpose()?,
        };
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AdminServiceError::UserNotFound)?;
        if patch.is_empty() {
            return Ok(user);
        }
        self.repo.update(id, &patch).await
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    /// `actor_id` is the authenticated caller; nobody may delete themselves.
    pub async fn execute(&self, actor_id: i64, id: i64) -> Result<(), AdminServiceError> {
        if actor_id == id {
            return Err(AdminServiceError::CannotDeleteSelf);
        }
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AdminServiceError::UserNotFound)?;
        self.repo.soft_delete(id).await
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ResetPasswordUseCase<R> {
    pub async fn execute(&self, id: i64, password: &str) -> Result<(), AdminServiceError> {
        let password_hash = hash(password)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AdminServiceError::UserNotFound)?;
        self.repo.update_password(id, &password_hash).await
    }
}

// ── AssignRoles ──────────────────────────────────────────────────────────────

pub struct AssignRolesUseCase<U: UserRepository, R: RoleRepository> {
    pub users: U,
    pub roles: R,
}

impl<U: UserRepository, R: RoleRepository> AssignRolesUseCase<U, R> {
    /// Replace the user's roles with `role_ids`. Ids that do not name a live
    /// role are dropped. Returns the ids actually assigned.
    pub async fn execute(
        &self,
        user_id: i64,
        role_ids: &[i64],
    ) -> Result<Vec<i64>, AdminServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AdminServiceError::UserNotFound)?;
        let requested = dedup_ids(role_ids);
        let existing = self.roles.existing_ids(&requested).await?;
        let assigned: Vec<i64> = requested.into_iter().filter(|id| existing.contains(id)).collect();
        self.users.replace_roles(user_id, &assigned).await?;
        Ok(assigned)
    }

    /// Whether `role_ids` names a live role whose code is `code`.
    pub async fn grants_role_code(
        &self,
        role_ids: &[i64],
        code: &str,
    ) -> Result<bool, AdminServiceError> {
        for id in dedup_ids(role_ids) {
            let role = self.roles.find_by_id(id).await?;
            if role.is_some_and(|r| r.code == code) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
