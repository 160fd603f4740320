use async_trait::async_trait;
use dashmap::DashMap;
use snapix_domain::error::DomainResult;
use snapix_domain::file::{FileId, FileRecord};
use snapix_domain::persist::{FileFilter, FileRepository, PostRepository, UserRepository};
use snapix_domain::post::{Post, PostId};
use snapix_domain::user::{Email, UserId, UserProfile};

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: DashMap<UserId, UserProfile>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn count(&self) -> DomainResult<u64> {
        Ok(self.rows.len() as u64)
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<UserProfile>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<UserProfile>> {
        Ok(self
            .rows
            .iter()
            .find(|r| r.value().email.eq_ignore_ascii_case(email.as_str()))
            .map(|r| r.value().clone()))
    }

    async fn save(&self, user: UserProfile) -> DomainResult<UserProfile> {
        self.rows.insert(user.id, user.clone());
        Ok(user)
    }
}

#[derive(Default)]
pub struct InMemoryPostRepository {
    rows: DashMap<PostId, Post>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn save(&self, post: Post) -> DomainResult<Post> {
        self.rows.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn delete_one(&self, id: PostId) -> DomainResult<bool> {
        Ok(self.rows.remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryFileRepository {
    rows: DashMap<FileId, FileRecord>,
}

impl InMemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn save(&self, record: FileRecord) -> DomainResult<FileRecord> {
        self.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_one(&self, filter: FileFilter) -> DomainResult<Option<FileRecord>> {
        // 多条匹配时取最早创建的一条
        Ok(self
            .rows
            .iter()
            .filter(|r| filter.matches(r.value()))
            .min_by_key(|r| r.value().created_at)
            .map(|r| r.value().clone()))
    }

    async fn find_by_id(&self, id: FileId) -> DomainResult<Option<FileRecord>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn delete_one(&self, id: FileId) -> DomainResult<bool> {
        Ok(self.rows.remove(&id).is_some())
    }
}
