use crate::dto::Dto;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use snapix_domain::user::{UserId, UserProfile};

/// 用户资料视图（不含确认码、找回码等内部字段）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileViewDto {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub city: Option<String>,
    pub about_me: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for UserProfileViewDto {
    fn from(user: UserProfile) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            date_of_birth: user.date_of_birth,
            city: user.city,
            about_me: user.about_me,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl Dto for UserProfileViewDto {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegisteredUsersCountDto {
    pub count: u64,
}

impl Dto for RegisteredUsersCountDto {}
