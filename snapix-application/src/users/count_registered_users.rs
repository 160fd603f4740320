use super::views::RegisteredUsersCountDto;
use crate::context::AppContext;
use crate::error::AppError;
use crate::query::Query;
use crate::query_handler::QueryHandler;
use async_trait::async_trait;
use snapix_domain::persist::UserRepository;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
pub struct CountRegisteredUsersQuery;

impl Query for CountRegisteredUsersQuery {
    const NAME: &'static str = "CountRegisteredUsersQuery";
    type Dto = RegisteredUsersCountDto;
}

pub struct CountRegisteredUsersHandler {
    users: Arc<dyn UserRepository>,
}

impl CountRegisteredUsersHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl QueryHandler<CountRegisteredUsersQuery> for CountRegisteredUsersHandler {
    async fn handle(
        &self,
        _ctx: &AppContext,
        _q: CountRegisteredUsersQuery,
    ) -> Result<RegisteredUsersCountDto, AppError> {
        let count = self.users.count().await?;
        Ok(RegisteredUsersCountDto { count })
    }
}
