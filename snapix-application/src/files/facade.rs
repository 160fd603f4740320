use super::upload::ImageUpload;
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use snapix_domain::file::{FileId, FileKind, FileRecord};
use snapix_domain::persist::{FileFilter, FileRepository};
use snapix_domain::storage::{ObjectListing, ObjectMeta, ObjectStorage};
use snapix_domain::user::UserId;
use std::sync::Arc;

/// 图片文件门面：文件记录与对象存储的组合操作
///
/// 两个存储之间没有事务；写入先放对象再存记录，删除先删对象再删记录。
#[derive(Clone)]
pub struct ImageFilesFacade {
    files: Arc<dyn FileRepository>,
    storage: Arc<dyn ObjectStorage>,
}

impl ImageFilesFacade {
    pub fn new(files: Arc<dyn FileRepository>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { files, storage }
    }

    pub async fn store(
        &self,
        owner_id: UserId,
        kind: FileKind,
        upload: ImageUpload,
        now: DateTime<Utc>,
    ) -> AppResult<(FileRecord, ObjectMeta)> {
        let id = FileId::generate();
        let key = FileRecord::storage_key(kind, owner_id, id, upload.mime());

        let meta = self
            .storage
            .put_object(&key, upload.body().clone(), upload.mime().as_mime())
            .await?;

        let record = FileRecord::builder()
            .id(id)
            .owner_id(owner_id)
            .kind(kind)
            .key(key)
            .mime(upload.mime())
            .original_name(upload.original_name().to_string())
            .size(upload.size())
            .created_at(now)
            .build();
        let record = self.files.save(record).await?;

        Ok((record, meta))
    }

    /// 按文件 ID 取图片对象；没有记录或对象已不存在时返回空列表
    pub async fn get_image(&self, image_id: FileId) -> AppResult<ObjectListing> {
        match self.files.find_by_id(image_id).await? {
            Some(record) => Ok(self.storage.get_object(&record.key).await?),
            None => Ok(ObjectListing::default()),
        }
    }

    pub async fn find_record(&self, image_id: FileId) -> AppResult<Option<FileRecord>> {
        Ok(self.files.find_by_id(image_id).await?)
    }

    pub async fn find_avatar(&self, owner_id: UserId) -> AppResult<Option<FileRecord>> {
        Ok(self.files.find_one(FileFilter::avatar_of(owner_id)).await?)
    }

    pub async fn object_of(&self, record: &FileRecord) -> AppResult<ObjectListing> {
        Ok(self.storage.get_object(&record.key).await?)
    }

    pub async fn save_record(&self, record: FileRecord) -> AppResult<FileRecord> {
        Ok(self.files.save(record).await?)
    }

    /// 删除对象后删除记录
    pub async fn remove(&self, record: &FileRecord) -> AppResult<()> {
        self.storage.delete_object(&record.key).await?;
        self.files.delete_one(record.id).await?;
        Ok(())
    }
}
