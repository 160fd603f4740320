//! 对象存储端口
//!
//! 屏蔽二进制对象存储的具体实现（本地文件系统、内存、S3 等），按 key 读写。
//!
use crate::error::DomainResult;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// 对象元信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub key: String,
    pub url: String,
    pub size: u64,
    pub content_type: String,
}

/// 按 key 查询的结果；key 不存在时 `files` 为空
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectListing {
    pub files: Vec<ObjectMeta>,
}

impl ObjectListing {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn first(&self) -> Option<&ObjectMeta> {
        self.files.first()
    }
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str)
    -> DomainResult<ObjectMeta>;

    async fn get_object(&self, key: &str) -> DomainResult<ObjectListing>;

    /// 删除对象；key 已不存在时视为成功
    async fn delete_object(&self, key: &str) -> DomainResult<()>;
}
