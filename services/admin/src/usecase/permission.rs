use yiya_domain::permission::PermissionKind;

use crate::domain::repository::PermissionRepository;
use crate::domain::types::{NewPermission, Permission, PermissionPatch};
use crate::error::AdminServiceError;
use crate::usecase::require_text;

fn parse_kind(value: &str) -> Result<PermissionKind, AdminServiceError> {
    value
        .parse()
        .map_err(|e: yiya_domain::permission::UnknownPermissionKind| {
            AdminServiceError::invalid_input(e.to_string())
        })
}

async fn load_permission<R: PermissionRepository>(
    repo: &R,
    id: i64,
) -> Result<Permission, AdminServiceError> {
    repo.find_by_id(id)
        .await?
        .ok_or(AdminServiceError::PermissionNotFound)
}

// ── ListPermissions ──────────────────────────────────────────────────────────

pub struct ListPermissionsUseCase<R: PermissionRepository> {
    pub repo: R,
}

impl<R: PermissionRepository> ListPermissionsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Permission>, AdminServiceError> {
        self.repo.list().await
    }
}

// ── CreatePermission ─────────────────────────────────────────────────────────

pub struct CreatePermissionInput {
    pub name: String,
    pub code: String,
    /// `MENU`, `BUTTON` or `API`; defaults to `API`.
    pub kind: Option<String>,
    pub description: Option<String>,
}

pub struct CreatePermissionUseCase<R: PermissionRepository> {
    pub repo: R,
}

impl<R: PermissionRepository> CreatePermissionUseCase<R> {
    pub async fn execute(
        &self,
        input: CreatePermissionInput,
    ) -> Result<Permission, AdminServiceError> {
        require_text("name", &input.name, 50)?;
        require_text("code", &input.code, 100)?;
        let kind = match input.kind.as_deref() {
            Some(k) => parse_kind(k)?,
            None => PermissionKind::default(),
        };
        if self.repo.code_taken(&input.code).await? {
            return Err(AdminServiceError::PermissionCodeExists);
        }
        self.repo
            .create(&NewPermission {
                name: input.name,
                code: input.code,
                kind,
                description: input.description,
            })
            .await
    }
}

// ── GetPermission ────────────────────────────────────────────────────────────

pub struct GetPermissionUseCase<R: PermissionRepository> {
    pub repo: R,
}

impl<R: PermissionRepository> GetPermissionUseCase<R> {
    pub async fn execute(&self, id: i64) -> Result<Permission, AdminServiceError> {
        load_permission(&self.repo, id).await
    }
}

// ── UpdatePermission ─────────────────────────────────────────────────────────

pub struct UpdatePermissionInput {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub description: Option<String>,
}

pub struct UpdatePermissionUseCase<R: PermissionRepository> {
    pub repo: R,
}

impl<R: PermissionRepository> UpdatePermissionUseCase<R> {
    pub async fn execute(
        &self,
        id: i64,
        input: UpdatePermissionInput,
    ) -> Result<Permission, AdminServiceError> {
        if let Some(ref name) = input.name {
            require_text("name", name, 50)?;
        }
        let patch = PermissionPatch {
            name: input.name,
            kind: input.kind.as_deref().map(parse_kind).transpose()?,
            description: input.description,
        };
        load_permission(&self.repo, id).await?;
        self.repo.update(id, &patch).await
    }
}

// ── DeletePermission ─────────────────────────────────────────────────────────

pub struct DeletePermissionUseCase<R: PermissionRepository> {
    pub repo: R,
}

impl<R: PermissionRepository> DeletePermissionUseCase<R> {
    pub async fn execute(&self, id: i64) -> Result<(), AdminServiceError> {
        load_permission(&self.repo, id).await?;
        self.repo.soft_delete(id).await
    }
}
