//! 环境配置访问器
//!
//! 持有原始的键值表（`.env` 与进程环境合并），按需提供带默认值的类型化读取；
//! 必填项缺失时返回 [`ConfigError::MissingEnvVar`]。
//!
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TOKEN_TTL: &str = "1d";
const DEFAULT_STORAGE_ROOT: &str = "./storage";
const DEFAULT_NOTIFIER_QUEUE: &str = "notifier_queue";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// 必填的环境变量未设置
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    vars: HashMap<String, String>,
}

impl AppConfig {
    /// 读取 `.env`（若存在）后取进程环境
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_pairs(std::env::vars())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// 空字符串视同未设置
    fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn get_or_throw(&self, key: &str) -> Result<&str, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn duration_or(&self, key: &str, default: &str) -> Result<Duration, ConfigError> {
        let raw = self.get(key).unwrap_or(default);
        humantime::parse_duration(raw).map_err(|e| ConfigError::Invalid {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn is_dev(&self) -> bool {
        self.get("NODE_ENV").or_else(|| self.get("APP_ENV")) == Some("development")
    }

    pub fn port(&self) -> Result<u16, ConfigError> {
        match self.get("PORT") {
            None => Ok(DEFAULT_PORT),
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT".into(),
                reason: format!("'{raw}' is not a port number"),
            }),
        }
    }

    /// 统一路由前缀，规范为以 `/` 开头、不以 `/` 结尾；未设置时为空串
    pub fn global_prefix(&self) -> String {
        match self.get("GLOBAL_PREFIX").map(|p| p.trim_matches('/')) {
            Some(p) if !p.is_empty() => format!("/{p}"),
            _ => String::new(),
        }
    }

    pub fn database_url(&self) -> Option<&str> {
        self.get("DATABASE_URL")
    }

    /// 消息队列地址列表，逗号或空白分隔
    pub fn rmq_urls(&self) -> Vec<String> {
        self.get("RMQ_URLS")
            .map(|raw| {
                raw.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 通知服务监听的队列名
    pub fn rmq_notifier_queue(&self) -> String {
        self.get("RMQ_NOTIFIER_QUEUE")
            .unwrap_or(DEFAULT_NOTIFIER_QUEUE)
            .to_string()
    }

    pub fn access_token_secret(&self) -> Result<&str, ConfigError> {
        self.get_or_throw("ACCESS_TOKEN_SECRET")
    }

    pub fn access_token_expires_in(&self) -> Result<Duration, ConfigError> {
        self.duration_or("ACCESS_TOKEN_SECRET_EXPIRES_IN", DEFAULT_TOKEN_TTL)
    }

    pub fn refresh_token_secret(&self) -> Result<&str, ConfigError> {
        self.get_or_throw("REFRESH_TOKEN_SECRET")
    }

    pub fn refresh_token_expires_in(&self) -> Result<Duration, ConfigError> {
        self.duration_or("REFRESH_TOKEN_SECRET_EXPIRES_IN", DEFAULT_TOKEN_TTL)
    }

    pub fn app_version(&self) -> String {
        self.get("APP_VERSION")
            .unwrap_or(env!("CARGO_PKG_VERSION"))
            .to_string()
    }

    pub fn storage_root(&self) -> PathBuf {
        PathBuf::from(self.get("STORAGE_ROOT").unwrap_or(DEFAULT_STORAGE_ROOT))
    }

    /// 启动时调用：必填密钥、时长与端口格式有误即失败
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.access_token_secret()?;
        self.refresh_token_secret()?;
        self.access_token_expires_in()?;
        self.refresh_token_expires_in()?;
        self.port()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        AppConfig::from_pairs(pairs.iter().copied())
    }

    fn valid() -> Vec<(&'static str, &'static str)> {
        vec![
            ("ACCESS_TOKEN_SECRET", "access"),
            ("REFRESH_TOKEN_SECRET", "refresh"),
        ]
    }

    #[test]
    fn defaults_apply() {
        let c = config(&valid());
        assert_eq!(c.port().unwrap(), 3000);
        assert_eq!(c.global_prefix(), "");
        assert_eq!(c.access_token_expires_in().unwrap(), Duration::from_secs(86_400));
        assert_eq!(c.refresh_token_expires_in().unwrap(), Duration::from_secs(86_400));
        assert_eq!(c.storage_root(), PathBuf::from("./storage"));
        assert_eq!(c.database_url(), None);
        assert!(c.rmq_urls().is_empty());
        assert_eq!(c.rmq_notifier_queue(), "notifier_queue");
        assert!(!c.is_dev());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn missing_secrets_fail_validation() {
        let c = config(&[("ACCESS_TOKEN_SECRET", "access")]);
        assert_eq!(
            c.validate(),
            Err(ConfigError::MissingEnvVar("REFRESH_TOKEN_SECRET".into()))
        );

        let c = config(&[("REFRESH_TOKEN_SECRET", "refresh"), ("ACCESS_TOKEN_SECRET", " ")]);
        assert_eq!(
            c.access_token_secret(),
            Err(ConfigError::MissingEnvVar("ACCESS_TOKEN_SECRET".into()))
        );
    }

    #[test]
    fn parses_values() {
        let mut pairs = valid();
        pairs.extend([
            ("NODE_ENV", "development"),
            ("PORT", "8080"),
            ("GLOBAL_PREFIX", "api/v1/"),
            ("RMQ_URLS", "amqp://a:5672, amqp://b:5672"),
            ("ACCESS_TOKEN_SECRET_EXPIRES_IN", "15m"),
        ]);
        let c = config(&pairs);

        assert!(c.is_dev());
        assert_eq!(c.port().unwrap(), 8080);
        assert_eq!(c.global_prefix(), "/api/v1");
        assert_eq!(c.rmq_urls(), vec!["amqp://a:5672", "amqp://b:5672"]);
        assert_eq!(c.access_token_expires_in().unwrap(), Duration::from_secs(900));
    }

    #[test]
    fn malformed_values_fail_validation() {
        let mut pairs = valid();
        pairs.push(("PORT", "http"));
        assert!(matches!(
            config(&pairs).validate(),
            Err(ConfigError::Invalid { key, .. }) if key == "PORT"
        ));

        let mut pairs = valid();
        pairs.push(("REFRESH_TOKEN_SECRET_EXPIRES_IN", "soon"));
        assert!(config(&pairs).validate().is_err());
    }

    #[test]
    fn app_env_is_accepted_for_environment() {
        assert!(config(&[("APP_ENV", "development")]).is_dev());
    }
}
