use super::value_objects::{AboutMe, City, DateOfBirth, PersonName, Username};
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use bon::Builder;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use snapix_macros::entity_id;

/// 找回密码临时码有效期（分钟）
pub const RECOVERY_CODE_TTL_MINUTES: i64 = 60;

/// 用户标识（由认证服务在注册时分配的自增主键）
#[entity_id]
pub struct UserId(i64);

/// 用户资料
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[builder(default)]
    pub email_confirmed: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub city: Option<String>,
    pub about_me: Option<String>,
    pub confirmation_code: Option<String>,
    pub recovery_code: Option<String>,
    pub recovery_code_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 已校验的资料填写内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDetails {
    pub username: Username,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub date_of_birth: Option<DateOfBirth>,
    pub city: Option<City>,
    pub about_me: Option<AboutMe>,
}

impl Entity for UserProfile {
    type Id = UserId;
    const TYPE: &'static str = "user";

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl UserProfile {
    /// 以填写内容覆盖资料（可选字段缺省即清空）
    pub fn fill_out(&mut self, details: ProfileDetails, now: DateTime<Utc>) {
        self.username = details.username.as_str().to_string();
        self.first_name = Some(details.first_name.as_str().to_string());
        self.last_name = Some(details.last_name.as_str().to_string());
        self.date_of_birth = details.date_of_birth.map(|d| d.value());
        self.city = details.city.map(|c| c.as_str().to_string());
        self.about_me = details.about_me.map(|a| a.as_str().to_string());
        self.updated_at = now;
    }

    /// 重新签发邮箱确认码；已确认的邮箱不再签发
    pub fn issue_confirmation_code(
        &mut self,
        code: impl Into<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if self.email_confirmed {
            return Err(DomainError::InvalidState {
                reason: format!("email {} is already confirmed", self.email),
            });
        }
        self.confirmation_code = Some(code.into());
        self.updated_at = now;
        Ok(())
    }

    /// 签发找回密码临时码，返回过期时间
    pub fn issue_recovery_code(
        &mut self,
        code: impl Into<String>,
        now: DateTime<Utc>,
    ) -> DateTime<Utc> {
        let expires_at = now + Duration::minutes(RECOVERY_CODE_TTL_MINUTES);
        self.recovery_code = Some(code.into());
        self.recovery_code_expires_at = Some(expires_at);
        self.updated_at = now;
        expires_at
    }
}
