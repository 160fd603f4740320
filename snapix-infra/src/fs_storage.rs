//! 本地文件系统对象存储
//!
//! 对象按 key 存放在根目录下（key 中的 `/` 即子目录），
//! 对外 URL 为 `{public_base}/{key}`，由接口层以静态目录方式提供。
//!
use async_trait::async_trait;
use bytes::Bytes;
use snapix_domain::error::{DomainError, DomainResult};
use snapix_domain::storage::{ObjectListing, ObjectMeta, ObjectStorage};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

pub struct FsObjectStorage {
    root: PathBuf,
    public_base: String,
}

impl FsObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 只接受由普通路径段组成的相对 key
    fn path_of(&self, key: &str) -> DomainResult<PathBuf> {
        let relative = Path::new(key);
        let plain = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(DomainError::storage(format!("invalid object key: {key}")));
        }
        Ok(self.root.join(relative))
    }

    fn meta(&self, key: &str, size: u64) -> ObjectMeta {
        ObjectMeta {
            key: key.to_string(),
            url: format!("{}/{}", self.public_base, key),
            size,
            content_type: content_type_of(key).to_string(),
        }
    }
}

fn content_type_of(key: &str) -> &'static str {
    match Path::new(key).extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl ObjectStorage for FsObjectStorage {
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        _content_type: &str,
    ) -> DomainResult<ObjectMeta> {
        let path = self.path_of(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &body).await?;
        tracing::debug!(key, size = body.len(), "object stored");
        Ok(self.meta(key, body.len() as u64))
    }

    async fn get_object(&self, key: &str) -> DomainResult<ObjectListing> {
        let path = self.path_of(key)?;
        match tokio::fs::metadata(&path).await {
            Ok(md) if md.is_file() => Ok(ObjectListing {
                files: vec![self.meta(key, md.len())],
            }),
            Ok(_) => Ok(ObjectListing::default()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(ObjectListing::default()),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete_object(&self, key: &str) -> DomainResult<()> {
        let path = self.path_of(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
