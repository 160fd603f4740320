//! 事件引擎（EventEngine）
//!
//! 订阅总线事件流，按处理器声明的事件类型匹配并发分发；
//! 处理失败只记录日志，不重试、不补偿。提供关闭与等待的 `EngineHandle`。
//!
use super::{EventBus, EventHandler};
use crate::domain_event::EventEnvelope;
use crate::error::DomainResult;
use bon::Builder;
use futures_core::stream::BoxStream;
use futures_util::{StreamExt, stream};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Clone, Debug)]
pub struct EventEngineConfig {
    /// 单个事件并发执行的处理器上限
    pub handler_concurrency: usize,
}

impl Default for EventEngineConfig {
    fn default() -> Self {
        Self {
            handler_concurrency: 8,
        }
    }
}

#[derive(Builder)]
pub struct EventEngine {
    event_bus: Arc<dyn EventBus>,
    #[builder(default)]
    event_handlers: Vec<Arc<dyn EventHandler>>,
    #[builder(default)]
    config: EventEngineConfig,
}

impl EventEngine {
    /// 启动事件引擎
    ///
    /// 在返回前完成订阅，因此此后发布的事件都会被处理。
    pub async fn start(self: Arc<Self>) -> EngineHandle {
        let token = CancellationToken::new();
        let stream = self.event_bus.subscribe().await;
        let task = tokio::spawn(self.subscribe_loop(stream, token.clone()));
        EngineHandle { token, task }
    }

    fn matching(&self, event_type: &str) -> Vec<Arc<dyn EventHandler>> {
        self.event_handlers
            .iter()
            .filter(|h| h.handled_event_type().matches(event_type))
            .cloned()
            .collect()
    }

    async fn subscribe_loop(
        self: Arc<Self>,
        mut stream: BoxStream<'static, DomainResult<EventEnvelope>>,
        token: CancellationToken,
    ) {
        let concurrency = self.config.handler_concurrency.max(1);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                maybe_event = stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            let handlers = self.matching(event.event_type());
                            if handlers.is_empty() {
                                continue;
                            }

                            stream::iter(handlers)
                                .for_each_concurrent(Some(concurrency), |h| {
                                    let ev = &event;
                                    async move {
                                        if let Err(err) = h.handle(ev).await {
                                            tracing::warn!(
                                                handler = h.handler_name(),
                                                event_type = ev.event_type(),
                                                event_id = ev.metadata.event_id(),
                                                error = %err,
                                                "event handler failed"
                                            );
                                        }
                                    }
                                })
                                .await;
                        }
                        Some(Err(err)) => {
                            // 订阅方落后导致的丢失，继续处理后续事件
                            tracing::warn!(error = %err, "event stream lagged");
                        }
                        None => break,
                    }
                }
            }
        }
    }
}

/// 引擎句柄：用于关闭并等待后台任务结束
pub struct EngineHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl EngineHandle {
    pub async fn shutdown(self) {
        self.token.cancel();
        let _ = self.task.await;
    }
}
