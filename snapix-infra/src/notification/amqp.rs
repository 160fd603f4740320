use super::{NotificationMessage, NotificationSink};
use async_trait::async_trait;
use lapin::options::{BasicPublishOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties};
use snapix_domain::error::{DomainError, DomainResult};

fn broker_error(err: impl std::fmt::Display) -> DomainError {
    DomainError::Notification {
        reason: err.to_string(),
    }
}

/// RabbitMQ 投递：消息体为 `{"pattern": {cmd, type}, "data": ...}` 的 JSON，
/// 经默认交换机路由到通知服务监听的持久化队列
pub struct AmqpNotificationSink {
    // 连接须与通道同生命周期
    _connection: Connection,
    channel: Channel,
    queue: String,
}

impl AmqpNotificationSink {
    /// 依次尝试 `urls`，使用第一个连通的代理
    pub async fn connect(urls: &[String], queue: impl Into<String>) -> DomainResult<Self> {
        let queue = queue.into();
        let mut last_error = broker_error("no broker url configured");

        for url in urls {
            match Self::open(url, &queue).await {
                Ok((connection, channel)) => {
                    tracing::info!(%queue, "connected to notification broker");
                    return Ok(Self {
                        _connection: connection,
                        channel,
                        queue,
                    });
                }
                Err(err) => {
                    tracing::warn!(error = %err, "notification broker unreachable, trying next url");
                    last_error = err;
                }
            }
        }
        Err(last_error)
    }

    async fn open(url: &str, queue: &str) -> DomainResult<(Connection, Channel)> {
        let connection = Connection::connect(url, ConnectionProperties::default())
            .await
            .map_err(broker_error)?;
        let channel = connection.create_channel().await.map_err(broker_error)?;
        channel
            .queue_declare(
                queue,
                QueueDeclareOptions {
                    durable: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(broker_error)?;
        Ok((connection, channel))
    }
}

#[async_trait]
impl NotificationSink for AmqpNotificationSink {
    async fn deliver(&self, message: &NotificationMessage) -> DomainResult<()> {
        let payload = serde_json::to_vec(message)?;
        self.channel
            .basic_publish(
                "",
                &self.queue,
                BasicPublishOptions::default(),
                &payload,
                BasicProperties::default().with_content_type("application/json".into()),
            )
            .await
            .map_err(broker_error)?
            .await
            .map_err(broker_error)?;
        Ok(())
    }
}
