//! Snapix HTTP 服务（snapix-api）
//!
//! - [`config`]：环境配置访问器
//! - [`observability`]：日志/追踪初始化
//! - [`auth`]：Bearer JWT 认证
//! - [`upload`]：multipart 图片上传校验
//! - [`routes`] 与 [`app`]：路由表
//! - [`state`]：组合根
//! - [`errors`]：错误到 HTTP 响应的统一翻译
//!
pub mod app;
pub mod auth;
pub mod config;
pub mod errors;
pub mod observability;
pub mod routes;
pub mod state;
pub mod upload;
