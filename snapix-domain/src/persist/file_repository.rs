use crate::error::DomainResult;
use crate::file::{FileId, FileKind, FileRecord};
use crate::user::UserId;
use async_trait::async_trait;

/// 等值过滤条件：`{owner_id, kind}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub owner_id: UserId,
    pub kind: FileKind,
}

impl FileFilter {
    pub fn avatar_of(owner_id: UserId) -> Self {
        Self {
            owner_id,
            kind: FileKind::Avatar,
        }
    }

    pub fn matches(&self, record: &FileRecord) -> bool {
        record.owner_id == self.owner_id && record.kind == self.kind
    }
}

#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn save(&self, record: FileRecord) -> DomainResult<FileRecord>;

    async fn find_one(&self, filter: FileFilter) -> DomainResult<Option<FileRecord>>;

    async fn find_by_id(&self, id: FileId) -> DomainResult<Option<FileRecord>>;

    async fn delete_one(&self, id: FileId) -> DomainResult<bool>;
}
