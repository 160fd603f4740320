//! 组合根：按配置装配仓储、存储、通知、事件引擎与总线
//!
use crate::auth::{JwtKeys, TokenVerifier};
use crate::config::AppConfig;
use crate::errors::StartupError;
use snapix_application::registry::{Collaborators, register_handlers};
use snapix_application::{InMemoryCommandBus, InMemoryQueryBus};
use snapix_domain::eventing::{EngineHandle, EventBus, EventEngine, InMemoryEventBus};
use snapix_domain::persist::{FileRepository, PostRepository, UserRepository};
use snapix_infra::memory::{InMemoryFileRepository, InMemoryPostRepository, InMemoryUserRepository};
use snapix_infra::postgres::{self, PgFileRepository, PgPostRepository, PgUserRepository};
use snapix_infra::notification::ForwarderHandle;
use snapix_infra::{
    AmqpNotificationSink, BroadcastNotificationClient, FsObjectStorage, LogNotificationSink,
    NotificationForwarder, NotificationSink,
};
use std::path::PathBuf;
use std::sync::Arc;

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub commands: Arc<InMemoryCommandBus>,
    pub queries: Arc<InMemoryQueryBus>,
    pub tokens: Arc<dyn TokenVerifier>,
    pub version: String,
}

/// 装配结果：路由状态与需要随进程存活的后台部件
pub struct Runtime {
    pub state: AppState,
    pub storage_root: PathBuf,
    pub prefix: String,
    users: Arc<dyn UserRepository>,
    engine: EngineHandle,
    forwarder: ForwarderHandle,
}

impl Runtime {
    /// 用户仓储（账号由认证服务写入，运维导入与测试预置经此进行）
    pub fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    pub async fn shutdown(self) {
        self.engine.shutdown().await;
        self.forwarder.shutdown().await;
        tracing::info!("event engine and notification forwarder stopped");
    }
}

type Repositories = (
    Arc<dyn UserRepository>,
    Arc<dyn PostRepository>,
    Arc<dyn FileRepository>,
);

async fn repositories(config: &AppConfig) -> Result<Repositories, StartupError> {
    match config.database_url() {
        Some(url) => {
            let pool = postgres::connect(url).await?;
            postgres::bootstrap_schema(&pool).await?;
            let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
            let posts: Arc<dyn PostRepository> = Arc::new(PgPostRepository::new(pool.clone()));
            let files: Arc<dyn FileRepository> = Arc::new(PgFileRepository::new(pool));
            Ok((users, posts, files))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; data is kept in memory only");
            let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
            let posts: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
            let files: Arc<dyn FileRepository> = Arc::new(InMemoryFileRepository::new());
            Ok((users, posts, files))
        }
    }
}

/// 通知去向：配置了 `RMQ_URLS` 时连接 RabbitMQ，否则写日志
async fn notification_sink(config: &AppConfig) -> Result<Arc<dyn NotificationSink>, StartupError> {
    let urls = config.rmq_urls();
    if urls.is_empty() {
        tracing::warn!("RMQ_URLS not set; notifications are written to the log");
        return Ok(Arc::new(LogNotificationSink));
    }
    let sink = AmqpNotificationSink::connect(&urls, config.rmq_notifier_queue()).await?;
    Ok(Arc::new(sink))
}

pub async fn compose(config: &AppConfig) -> Result<Runtime, StartupError> {
    let sink = notification_sink(config).await?;
    compose_with_sink(config, sink).await
}

/// 以指定的通知去向装配
pub async fn compose_with_sink(
    config: &AppConfig,
    sink: Arc<dyn NotificationSink>,
) -> Result<Runtime, StartupError> {
    let prefix = config.global_prefix();
    let tokens: Arc<dyn TokenVerifier> = Arc::new(JwtKeys::from_config(config)?);
    let (users, posts, files) = repositories(config).await?;

    let storage_root = config.storage_root();
    let storage = Arc::new(FsObjectStorage::new(
        storage_root.clone(),
        format!("{prefix}/files"),
    ));

    let notifications = Arc::new(BroadcastNotificationClient::default());
    let events = Arc::new(InMemoryEventBus::default());

    let deps = Collaborators::builder()
        .users(users.clone())
        .posts(posts)
        .files(files)
        .storage(storage)
        .notifier(notifications.clone())
        .events(events.clone())
        .build();

    let commands = Arc::new(InMemoryCommandBus::new());
    let queries = Arc::new(InMemoryQueryBus::new());
    register_handlers(&commands, &queries, &deps)?;

    let forwarder = NotificationForwarder::spawn(&notifications, sink);
    let engine = Arc::new(
        EventEngine::builder()
            .event_bus(events as Arc<dyn EventBus>)
            .event_handlers(deps.event_listeners())
            .build(),
    )
    .start()
    .await;

    Ok(Runtime {
        state: AppState {
            commands,
            queries,
            tokens,
            version: config.app_version(),
        },
        storage_root,
        prefix,
        users,
        engine,
        forwarder,
    })
}
