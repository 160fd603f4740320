use crate::error::DomainResult;
use crate::user::{Email, UserId, UserProfile};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 已注册用户总数
    async fn count(&self) -> DomainResult<u64>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<UserProfile>>;

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<UserProfile>>;

    async fn save(&self, user: UserProfile) -> DomainResult<UserProfile>;
}
