use crate::domain::repository::MpUserRepository;
use crate::domain::types::{MpUser, MpUserPatch};
use crate::error::MpServiceError;

const NICKNAME_MAX: usize = 100;
const AVATAR_MAX: usize = 500;

pub struct UpdateMeUseCase<U: MpUserRepository> {
    pub users: U,
}

impl<U: MpUserRepository> UpdateMeUseCase<U> {
    pub async fn execute(
        &self,
        user_id: i64,
        patch: MpUserPatch,
    ) -> Result<MpUser, MpServiceError> {
        check_len("nickname", patch.nickname.as_deref(), NICKNAME_MAX)?;
        check_len("avatar", patch.avatar.as_deref(), AVATAR_MAX)?;

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(MpServiceError::UserNotFound);
        }
        self.users.update_profile(user_id, &patch).await
    }
}

fn check_len(field: &str, value: Option<&str>, max: usize) -> Result<(), MpServiceError> {
    match value {
        Some(v) if v.chars().count() > max => Err(MpServiceError::invalid_input(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}
