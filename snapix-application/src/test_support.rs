//! 处理器测试用的计数替身
//!
//! 所有替身共享一份调用日志，便于断言调用次数与先后顺序。
//!
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use futures_util::stream::{self, BoxStream, StreamExt};
use serde_json::Value;
use snapix_domain::domain_event::EventEnvelope;
use snapix_domain::error::DomainResult;
use snapix_domain::eventing::EventBus;
use snapix_domain::file::{FileId, FileKind, FileRecord, ImageMime};
use snapix_domain::notification::{NotificationClient, RoutingKey};
use snapix_domain::persist::{FileFilter, FileRepository, PostRepository, UserRepository};
use snapix_domain::post::{Post, PostId};
use snapix_domain::storage::{ObjectListing, ObjectMeta, ObjectStorage};
use snapix_domain::user::{Email, UserId, UserProfile};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.entries().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

pub struct FakeUsers {
    log: CallLog,
    rows: Mutex<HashMap<UserId, UserProfile>>,
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn count(&self) -> DomainResult<u64> {
        self.log.push("users.count");
        Ok(self.rows.lock().unwrap().len() as u64)
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<UserProfile>> {
        self.log.push(format!("users.find_by_id:{id}"));
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<UserProfile>> {
        self.log.push(format!("users.find_by_email:{}", email.as_str()));
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email.as_str())
            .cloned())
    }

    async fn save(&self, user: UserProfile) -> DomainResult<UserProfile> {
        self.log.push(format!("users.save:{}", user.id));
        self.rows.lock().unwrap().insert(user.id, user.clone());
        Ok(user)
    }
}

pub struct FakePosts {
    log: CallLog,
    rows: Mutex<HashMap<PostId, Post>>,
}

#[async_trait]
impl PostRepository for FakePosts {
    async fn save(&self, post: Post) -> DomainResult<Post> {
        self.log.push(format!("posts.save:{}", post.id));
        self.rows.lock().unwrap().insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        self.log.push(format!("posts.find_by_id:{id}"));
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn delete_one(&self, id: PostId) -> DomainResult<bool> {
        self.log.push(format!("posts.delete_one:{id}"));
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }
}

pub struct FakeFiles {
    log: CallLog,
    rows: Mutex<Vec<FileRecord>>,
}

impl FakeFiles {
    pub fn all(&self) -> Vec<FileRecord> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileRepository for FakeFiles {
    async fn save(&self, record: FileRecord) -> DomainResult<FileRecord> {
        self.log.push(format!("files.save:{}", record.id));
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|r| r.id != record.id);
        rows.push(record.clone());
        Ok(record)
    }

    async fn find_one(&self, filter: FileFilter) -> DomainResult<Option<FileRecord>> {
        self.log.push("files.find_one");
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| filter.matches(r))
            .cloned())
    }

    async fn find_by_id(&self, id: FileId) -> DomainResult<Option<FileRecord>> {
        self.log.push(format!("files.find_by_id:{id}"));
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn delete_one(&self, id: FileId) -> DomainResult<bool> {
        self.log.push(format!("files.delete_one:{id}"));
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() != before)
    }
}

pub struct FakeStorage {
    log: CallLog,
    objects: Mutex<HashMap<String, (Bytes, String)>>,
}

impl FakeStorage {
    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    /// 模拟对象被外部清理，只留下记录
    pub fn forget(&self, key: &str) {
        self.objects.lock().unwrap().remove(key);
    }

    fn meta(key: &str, body: &Bytes, content_type: &str) -> ObjectMeta {
        ObjectMeta {
            key: key.to_string(),
            url: format!("http://files.test/{key}"),
            size: body.len() as u64,
            content_type: content_type.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> DomainResult<ObjectMeta> {
        self.log.push(format!("storage.put:{key}"));
        let meta = Self::meta(key, &body, content_type);
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (body, content_type.to_string()));
        Ok(meta)
    }

    async fn get_object(&self, key: &str) -> DomainResult<ObjectListing> {
        self.log.push(format!("storage.get:{key}"));
        let files = self
            .objects
            .lock()
            .unwrap()
            .get(key)
            .map(|(body, ct)| vec![Self::meta(key, body, ct)])
            .unwrap_or_default();
        Ok(ObjectListing { files })
    }

    async fn delete_object(&self, key: &str) -> DomainResult<()> {
        self.log.push(format!("storage.delete:{key}"));
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(RoutingKey, Value)>>,
}

impl NotificationClient for RecordingNotifier {
    fn emit(&self, routing_key: RoutingKey, payload: Value) {
        self.sent.lock().unwrap().push((routing_key, payload));
    }
}

#[derive(Default)]
pub struct RecordingEventBus {
    pub published: Mutex<Vec<EventEnvelope>>,
}

#[async_trait]
impl EventBus for RecordingEventBus {
    async fn publish(&self, event: &EventEnvelope) -> DomainResult<()> {
        self.published.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn subscribe(&self) -> BoxStream<'static, DomainResult<EventEnvelope>> {
        stream::empty().boxed()
    }
}

/// 一组共享调用日志的替身
pub struct Fakes {
    pub log: CallLog,
    pub users: Arc<FakeUsers>,
    pub posts: Arc<FakePosts>,
    pub files: Arc<FakeFiles>,
    pub storage: Arc<FakeStorage>,
    pub notifier: Arc<RecordingNotifier>,
    pub events: Arc<RecordingEventBus>,
}

impl Fakes {
    pub fn new() -> Self {
        let log = CallLog::default();
        Self {
            users: Arc::new(FakeUsers {
                log: log.clone(),
                rows: Mutex::default(),
            }),
            posts: Arc::new(FakePosts {
                log: log.clone(),
                rows: Mutex::default(),
            }),
            files: Arc::new(FakeFiles {
                log: log.clone(),
                rows: Mutex::default(),
            }),
            storage: Arc::new(FakeStorage {
                log: log.clone(),
                objects: Mutex::default(),
            }),
            notifier: Arc::default(),
            events: Arc::default(),
            log,
        }
    }

    pub fn seed_user(&self, id: i64, username: &str, email: &str) -> UserProfile {
        let now = Utc::now();
        let user = UserProfile::builder()
            .id(UserId::new(id))
            .username(username.into())
            .email(email.into())
            .created_at(now)
            .updated_at(now)
            .build();
        self.users
            .rows
            .lock()
            .unwrap()
            .insert(user.id, user.clone());
        user
    }

    /// 直接写入一份图片对象与文件记录，不计入调用日志
    pub fn seed_image(&self, owner: UserId, kind: FileKind) -> FileRecord {
        let id = FileId::generate();
        let key = FileRecord::storage_key(kind, owner, id, ImageMime::Png);
        let record = FileRecord::builder()
            .id(id)
            .owner_id(owner)
            .kind(kind)
            .key(key.clone())
            .mime(ImageMime::Png)
            .original_name("seed.png".into())
            .size(4)
            .created_at(Utc::now())
            .build();
        self.storage.objects.lock().unwrap().insert(
            key,
            (Bytes::from_static(b"\x89PNG"), "image/png".into()),
        );
        self.files.rows.lock().unwrap().push(record.clone());
        record
    }

    /// 将已写入的文件记录标记为被某帖子引用
    pub fn mark_attached(&self, id: FileId, post_id: PostId) {
        if let Some(row) = self.files.rows.lock().unwrap().iter_mut().find(|r| r.id == id) {
            row.post_id = Some(post_id);
        }
    }

    pub fn seed_post(&self, post: Post) {
        self.posts.rows.lock().unwrap().insert(post.id, post);
    }
}
