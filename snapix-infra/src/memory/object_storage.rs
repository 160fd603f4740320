use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use snapix_domain::error::DomainResult;
use snapix_domain::storage::{ObjectListing, ObjectMeta, ObjectStorage};

struct StoredObject {
    body: Bytes,
    content_type: String,
}

pub struct InMemoryObjectStorage {
    public_base: String,
    objects: DashMap<String, StoredObject>,
}

impl InMemoryObjectStorage {
    pub fn new(public_base: impl Into<String>) -> Self {
        Self {
            public_base: public_base.into().trim_end_matches('/').to_string(),
            objects: DashMap::new(),
        }
    }

    /// 读取对象内容
    pub fn read(&self, key: &str) -> Option<Bytes> {
        self.objects.get(key).map(|o| o.body.clone())
    }

    fn meta(&self, key: &str, object: &StoredObject) -> ObjectMeta {
        ObjectMeta {
            key: key.to_string(),
            url: format!("{}/{}", self.public_base, key),
            size: object.body.len() as u64,
            content_type: object.content_type.clone(),
        }
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> DomainResult<ObjectMeta> {
        let object = StoredObject {
            body,
            content_type: content_type.to_string(),
        };
        let meta = self.meta(key, &object);
        self.objects.insert(key.to_string(), object);
        Ok(meta)
    }

    async fn get_object(&self, key: &str) -> DomainResult<ObjectListing> {
        let files = self
            .objects
            .get(key)
            .map(|o| vec![self.meta(key, o.value())])
            .unwrap_or_default();
        Ok(ObjectListing { files })
    }

    async fn delete_object(&self, key: &str) -> DomainResult<()> {
        self.objects.remove(key);
        Ok(())
    }
}
