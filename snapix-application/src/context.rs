use snapix_domain::domain_event::BusinessContext;
use snapix_domain::user::UserId;

/// 应用层上下文（Application Context）
///
/// 承载一次命令/查询调用的横切信息：
/// - `biz`：业务语境（请求关联 ID、执行主体），随领域事件一起发布；
/// - `user_id`：经认证的调用者；系统内部调用时为空。
///
/// ```rust
/// use snapix_application::context::AppContext;
/// use snapix_domain::user::UserId;
///
/// let ctx = AppContext::for_user(UserId::new(7), Some("req-1".into()));
/// assert_eq!(ctx.user_id, Some(UserId::new(7)));
/// assert_eq!(ctx.biz.correlation_id(), Some("req-1"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AppContext {
    pub biz: BusinessContext,
    pub user_id: Option<UserId>,
}

impl AppContext {
    pub fn for_user(user_id: UserId, correlation_id: Option<String>) -> Self {
        Self {
            biz: BusinessContext::for_user(user_id, correlation_id),
            user_id: Some(user_id),
        }
    }
}
