use super::views::UserProfileViewDto;
use crate::context::AppContext;
use crate::error::AppError;
use crate::query::Query;
use crate::query_handler::QueryHandler;
use async_trait::async_trait;
use snapix_domain::persist::UserRepository;
use snapix_domain::user::UserId;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub struct GetProfileInfoQuery {
    pub user_id: UserId,
}

impl Query for GetProfileInfoQuery {
    const NAME: &'static str = "GetProfileInfoQuery";
    type Dto = UserProfileViewDto;
}

pub struct GetProfileInfoHandler {
    users: Arc<dyn UserRepository>,
}

impl GetProfileInfoHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl QueryHandler<GetProfileInfoQuery> for GetProfileInfoHandler {
    async fn handle(
        &self,
        _ctx: &AppContext,
        q: GetProfileInfoQuery,
    ) -> Result<UserProfileViewDto, AppError> {
        self.users
            .find_by_id(q.user_id)
            .await?
            .map(UserProfileViewDto::from)
            .ok_or_else(|| AppError::not_found(format!("user {} not found", q.user_id)))
    }
}
