//! 处理器注册（组合）
//!
//! 启动时一次性把全部用例处理器注册到总线；任何重复注册都会中止启动。
//!
use crate::auth::{
    RecoverPasswordCommand, RecoverPasswordHandler, ResendConfirmationCodeCommand,
    ResendConfirmationCodeHandler,
};
use crate::error::AppError;
use crate::files::{DeleteAvatarFileCommand, DeleteAvatarFileHandler, ImageFilesFacade};
use crate::notification::NotificationService;
use crate::posts::{
    AttachPostImageListener, CreatePostCommand, CreatePostHandler, DeletePostCommand,
    DeletePostHandler, GetPostHandler, GetPostQuery, UploadPostImageCommand,
    UploadPostImageHandler,
};
use crate::users::{
    CountRegisteredUsersHandler, CountRegisteredUsersQuery, FillOutProfileCommand,
    FillOutProfileHandler, GetAvatarHandler, GetAvatarQuery, GetProfileInfoHandler,
    GetProfileInfoQuery, UploadAvatarCommand, UploadAvatarHandler,
};
use crate::{InMemoryCommandBus, InMemoryQueryBus};
use bon::Builder;
use snapix_domain::eventing::{EventBus, EventHandler};
use snapix_domain::notification::NotificationClient;
use snapix_domain::persist::{FileRepository, PostRepository, UserRepository};
use snapix_domain::storage::ObjectStorage;
use std::sync::Arc;

/// 用例所依赖的外部协作方
#[derive(Builder, Clone)]
pub struct Collaborators {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub files: Arc<dyn FileRepository>,
    pub storage: Arc<dyn ObjectStorage>,
    pub notifier: Arc<dyn NotificationClient>,
    pub events: Arc<dyn EventBus>,
}

impl Collaborators {
    fn image_files(&self) -> ImageFilesFacade {
        ImageFilesFacade::new(self.files.clone(), self.storage.clone())
    }

    /// 需要挂到事件引擎上的监听器
    pub fn event_listeners(&self) -> Vec<Arc<dyn EventHandler>> {
        vec![Arc::new(AttachPostImageListener::new(self.image_files()))]
    }
}

pub fn register_handlers(
    commands: &InMemoryCommandBus,
    queries: &InMemoryQueryBus,
    deps: &Collaborators,
) -> Result<(), AppError> {
    let image_files = deps.image_files();
    let notifications = NotificationService::new(deps.notifier.clone());

    queries.register::<CountRegisteredUsersQuery, _>(Arc::new(
        CountRegisteredUsersHandler::new(deps.users.clone()),
    ))?;
    queries.register::<GetProfileInfoQuery, _>(Arc::new(GetProfileInfoHandler::new(
        deps.users.clone(),
    )))?;
    queries.register::<GetAvatarQuery, _>(Arc::new(GetAvatarHandler::new(image_files.clone())))?;
    queries.register::<GetPostQuery, _>(Arc::new(GetPostHandler::new(deps.posts.clone())))?;

    commands.register::<FillOutProfileCommand, _>(Arc::new(FillOutProfileHandler::new(
        deps.users.clone(),
    )))?;
    commands.register::<UploadAvatarCommand, _>(Arc::new(UploadAvatarHandler::new(
        image_files.clone(),
    )))?;
    commands.register::<DeleteAvatarFileCommand, _>(Arc::new(DeleteAvatarFileHandler::new(
        image_files.clone(),
    )))?;
    commands.register::<UploadPostImageCommand, _>(Arc::new(UploadPostImageHandler::new(
        image_files.clone(),
    )))?;
    commands.register::<CreatePostCommand, _>(Arc::new(CreatePostHandler::new(
        deps.posts.clone(),
        image_files.clone(),
        deps.events.clone(),
    )))?;
    commands.register::<DeletePostCommand, _>(Arc::new(DeletePostHandler::new(
        deps.posts.clone(),
        image_files,
        deps.events.clone(),
    )))?;
    commands.register::<ResendConfirmationCodeCommand, _>(Arc::new(
        ResendConfirmationCodeHandler::new(deps.users.clone(), notifications.clone()),
    ))?;
    commands.register::<RecoverPasswordCommand, _>(Arc::new(RecoverPasswordHandler::new(
        deps.users.clone(),
        notifications,
    )))?;

    tracing::info!(
        commands = commands.registered_commands().len(),
        queries = queries.registered_queries().len(),
        "handlers registered"
    );
    Ok(())
}
