use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use yiya_core::sea_ext::SelectExt;
use yiya_mp_schema::mp_user;

use crate::domain::repository::MpUserRepository;
use crate::domain::types::{MpUser, MpUserPatch, NewMpUser};
use crate::error::MpServiceError;

#[derive(Clone)]
pub struct DbMpUserRepository {
    pub db: DatabaseConnection,
}

impl MpUserRepository for DbMpUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<MpUser>, MpServiceError> {
        let model = mp_user::Entity::find_by_id(id)
            .not_deleted(mp_user::Column::DeletedAt)
            .one(&self.db)
            .await
            .context("find mp user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_openid(&self, openid: &str) -> Result<Option<MpUser>, MpServiceError> {
        let model = mp_user::Entity::find()
            .filter(mp_user::Column::Openid.eq(openid))
            .one(&self.db)
            .await
            .context("find mp user by openid")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &NewMpUser) -> Result<MpUser, MpServiceError> {
        let now = Utc::now();
        let model = mp_user::ActiveModel {
            openid: Set(user.openid.clone()),
            unionid: Set(user.unionid.clone()),
            session_key: Set(Some(user.session_key.clone())),
            nickname: Set(Some(user.nickname.clone())),
            avatar: Set(None),
            phone: Set(None),
            gender: Set(None),
            country: Set(None),
            province: Set(None),
            city: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create mp user")?;
        Ok(user_from_model(model))
    }

    async fn update_session(
        &self,
        id: i64,
        session_key: &str,
        unionid: Option<&str>,
    ) -> Result<MpUser, MpServiceError> {
        let mut active = mp_user::ActiveModel {
            id: Set(id),
            session_key: Set(Some(session_key.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(unionid) = unionid {
            active.unionid = Set(Some(unionid.to_owned()));
        }
        let model = active
            .update(&self.db)
            .await
            .context("update mp user session")?;
        Ok(user_from_model(model))
    }

    async fn update_phone(&self, id: i64, phone: &str) -> Result<(), MpServiceError> {
        mp_user::ActiveModel {
            id: Set(id),
            phone: Set(Some(phone.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update mp user phone")?;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: i64,
        patch: &MpUserPatch,
    ) -> Result<MpUser, MpServiceError> {
        let mut active = mp_user::ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(ref v) = patch.nickname {
            active.nickname = Set(Some(v.clone()));
        }
        if let Some(ref v) = patch.avatar {
            active.avatar = Set(Some(v.clone()));
        }
        let model = active
            .update(&self.db)
            .await
            .context("update mp user profile")?;
        Ok(user_from_model(model))
    }
}

fn user_from_model(m: mp_user::Model) -> MpUser {
    MpUser {
        id: m.id,
        openid: m.openid,
        unionid: m.unionid,
        session_key: m.session_key,
        nickname: m.nickname,
        avatar: m.avatar,
        phone: m.phone,
        gender: m.gender,
        country: m.country,
        province: m.province,
        city: m.city,
        created_at: m.created_at,
        updated_at: m.updated_at,
        deleted_at: m.deleted_at,
    }
}
