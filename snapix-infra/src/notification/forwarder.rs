use super::{BroadcastNotificationClient, NotificationMessage};
use async_trait::async_trait;
use snapix_domain::error::DomainResult;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// 通知的最终去向（消息代理、日志等）
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, message: &NotificationMessage) -> DomainResult<()>;
}

/// 未配置消息代理时的去向：以 info 级别写入日志，便于本地开发取到验证码
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotificationSink;

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn deliver(&self, message: &NotificationMessage) -> DomainResult<()> {
        tracing::info!(
            pattern = %message.pattern,
            data = %message.data,
            "notification (no broker configured)"
        );
        Ok(())
    }
}

/// 订阅广播通道并逐条投递；投递失败只记录，不重试
pub struct NotificationForwarder;

impl NotificationForwarder {
    /// 在返回前完成订阅，此后发出的通知都会被转发
    pub fn spawn(
        client: &BroadcastNotificationClient,
        sink: Arc<dyn NotificationSink>,
    ) -> ForwarderHandle {
        let mut rx = client.subscribe();
        let token = CancellationToken::new();
        let stop = token.clone();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = stop.cancelled() => break,
                    received = rx.recv() => match received {
                        Ok(message) => {
                            if let Err(err) = sink.deliver(&message).await {
                                tracing::warn!(
                                    pattern = %message.pattern,
                                    error = %err,
                                    "notification delivery failed"
                                );
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "notification forwarder lagged");
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
        });

        ForwarderHandle { token, task }
    }
}

pub struct ForwarderHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl ForwarderHandle {
    pub async fn shutdown(self) {
        self.token.cancel();
        let _ = self.task.await;
    }
}
