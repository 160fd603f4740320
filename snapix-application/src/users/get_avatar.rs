use crate::context::AppContext;
use crate::error::AppError;
use crate::files::{AvatarViewDto, ImageFileView, ImageFilesFacade};
use crate::query::Query;
use crate::query_handler::QueryHandler;
use async_trait::async_trait;
use snapix_domain::user::UserId;

#[derive(Debug, Clone, Copy)]
pub struct GetAvatarQuery {
    pub user_id: UserId,
}

impl Query for GetAvatarQuery {
    const NAME: &'static str = "GetAvatarQuery";
    type Dto = AvatarViewDto;
}

pub struct GetAvatarHandler {
    files: ImageFilesFacade,
}

impl GetAvatarHandler {
    pub fn new(files: ImageFilesFacade) -> Self {
        Self { files }
    }
}

#[async_trait]
impl QueryHandler<GetAvatarQuery> for GetAvatarHandler {
    async fn handle(&self, _ctx: &AppContext, q: GetAvatarQuery) -> Result<AvatarViewDto, AppError> {
        let Some(record) = self.files.find_avatar(q.user_id).await? else {
            return Ok(AvatarViewDto::default());
        };

        let listing = self.files.object_of(&record).await?;
        Ok(AvatarViewDto {
            files: listing
                .files
                .iter()
                .map(|meta| ImageFileView::new(record.id, meta))
                .collect(),
        })
    }
}
