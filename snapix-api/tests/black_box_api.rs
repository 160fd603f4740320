use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use snapix_api::auth::JwtKeys;
use snapix_api::config::AppConfig;
use snapix_api::state::{self, Runtime};
use snapix_domain::error::DomainResult;
use snapix_domain::notification::RoutingKey;
use snapix_domain::persist::UserRepository;
use snapix_domain::user::{UserId, UserProfile};
use snapix_infra::{NotificationMessage, NotificationSink};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc;

const ACCESS_SECRET: &str = "test-access-secret";

/// 1x1 PNG 文件头，内容本身不做解码校验
const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0x0d];

/// 记录经转发任务送达的通知
struct ChannelSink(mpsc::UnboundedSender<NotificationMessage>);

#[async_trait]
impl NotificationSink for ChannelSink {
    async fn deliver(&self, message: &NotificationMessage) -> DomainResult<()> {
        let _ = self.0.send(message.clone());
        Ok(())
    }
}

struct TestServer {
    base_url: String,
    runtime: Runtime,
    delivered: mpsc::UnboundedReceiver<NotificationMessage>,
    handle: tokio::task::JoinHandle<()>,
    _storage: TempDir,
}

impl TestServer {
    async fn spawn() -> Self {
        let storage = tempfile::tempdir().expect("failed to create storage dir");
        let config = AppConfig::from_pairs([
            ("ACCESS_TOKEN_SECRET", ACCESS_SECRET.to_string()),
            ("REFRESH_TOKEN_SECRET", "test-refresh-secret".to_string()),
            ("STORAGE_ROOT", storage.path().display().to_string()),
        ]);

        let (tx, delivered) = mpsc::unbounded_channel();
        let runtime = state::compose_with_sink(&config, Arc::new(ChannelSink(tx)))
            .await
            .expect("compose failed");
        let app = snapix_api::app::build_app(&runtime);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            runtime,
            delivered,
            handle,
            _storage: storage,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn next_notification(&mut self) -> NotificationMessage {
        tokio::time::timeout(Duration::from_secs(1), self.delivered.recv())
            .await
            .expect("notification delivered")
            .expect("forwarder alive")
    }

    async fn seed_user(&self, id: i64, email: &str) -> UserProfile {
        let now = Utc::now();
        let user = UserProfile::builder()
            .id(UserId::new(id))
            .username(format!("user{id}"))
            .email(email.to_string())
            .created_at(now)
            .updated_at(now)
            .build();
        self.runtime.users().save(user).await.unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(user_id: i64) -> String {
    JwtKeys::new(ACCESS_SECRET, Duration::from_secs(600))
        .sign(UserId::new(user_id))
        .expect("failed to sign jwt")
}

fn image_form(bytes: Vec<u8>, mime: &str) -> Form {
    let part = Part::bytes(bytes)
        .file_name("image")
        .mime_str(mime)
        .unwrap();
    Form::new().part("file", part)
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/users/profile")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(srv.url("/users/profile"))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .delete(srv.url("/users/profile/avatar"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_and_registered_users_count_are_public() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    srv.seed_user(1, "one@example.com").await;
    srv.seed_user(2, "two@example.com").await;

    let res = client
        .get(srv.url("/users/count-register-users"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn profile_can_be_read_and_filled_out() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    srv.seed_user(7, "seven@example.com").await;
    let token = mint_jwt(7);

    let res = client
        .get(srv.url("/users/profile"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["id"], 7);
    assert_eq!(body["email"], "seven@example.com");

    let res = client
        .put(srv.url("/users/profile"))
        .bearer_auth(&token)
        .json(&json!({
            "username": "seventh",
            "firstName": "Ann",
            "lastName": "Lee",
            "dateOfBirth": "1990-05-01",
            "city": "Oslo",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["username"], "seventh");
    assert_eq!(body["firstName"], "Ann");
    assert_eq!(body["city"], "Oslo");

    // 缺少必填字段
    let res = client
        .put(srv.url("/users/profile"))
        .bearer_auth(&token)
        .json(&json!({ "username": "seventh" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn profile_of_unknown_user_is_not_found() {
    let srv = TestServer::spawn().await;
    let res = reqwest::Client::new()
        .get(srv.url("/users/profile"))
        .bearer_auth(mint_jwt(404))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejected_avatar_uploads_leave_no_file_behind() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    srv.seed_user(3, "three@example.com").await;
    let token = mint_jwt(3);

    let oversized = vec![0u8; 1024 * 1024 + 11];
    let res = client
        .post(srv.url("/users/profile/avatar"))
        .bearer_auth(&token)
        .multipart(image_form(oversized, "image/png"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let res = client
        .post(srv.url("/users/profile/avatar"))
        .bearer_auth(&token)
        .multipart(image_form(PNG_BYTES.to_vec(), "image/gif"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let res = client
        .post(srv.url("/users/profile/avatar"))
        .bearer_auth(&token)
        .multipart(Form::new().text("note", "no file here"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(srv.url("/users/profile/avatar"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["files"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn avatar_upload_replace_and_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    srv.seed_user(5, "five@example.com").await;
    let token = mint_jwt(5);

    let res = client
        .post(srv.url("/users/profile/avatar"))
        .bearer_auth(&token)
        .multipart(image_form(PNG_BYTES.to_vec(), "image/png"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let first: Value = res.json().await.unwrap();
    let first_url = first["files"][0]["url"].as_str().unwrap().to_string();
    assert_eq!(first["files"][0]["size"], PNG_BYTES.len());

    // 上传的对象可通过静态路由读取
    let res = client.get(srv.url(&first_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.bytes().await.unwrap().as_ref(), PNG_BYTES);

    // 再次上传替换旧头像，旧对象被删除
    let res = client
        .post(srv.url("/users/profile/avatar"))
        .bearer_auth(&token)
        .multipart(image_form(PNG_BYTES.to_vec(), "image/jpeg"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let second: Value = res.json().await.unwrap();
    assert_ne!(second["files"][0]["fileId"], first["files"][0]["fileId"]);
    let res = client.get(srv.url(&first_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(srv.url("/users/profile/avatar"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let current: Value = res.json().await.unwrap();
    assert_eq!(current["files"][0]["fileId"], second["files"][0]["fileId"]);

    let res = client
        .delete(srv.url("/users/profile/avatar"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .delete(srv.url("/users/profile/avatar"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn post_lifecycle_upload_create_read_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    srv.seed_user(10, "author@example.com").await;
    srv.seed_user(11, "other@example.com").await;
    let author = mint_jwt(10);
    let other = mint_jwt(11);

    let res = client
        .post(srv.url("/posts/image"))
        .bearer_auth(&author)
        .multipart(image_form(PNG_BYTES.to_vec(), "image/png"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let image: Value = res.json().await.unwrap();
    let image_id = image["imageId"].as_str().unwrap().to_string();

    let res = client
        .post(srv.url("/posts"))
        .bearer_auth(&author)
        .json(&json!({ "imageId": image_id, "content": "first light" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    let post_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["authorId"], 10);
    assert_eq!(created["imageId"], image_id);

    let res = client
        .get(srv.url(&format!("/posts/{post_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await.unwrap();
    assert_eq!(fetched["content"], "first light");

    let res = client
        .delete(srv.url(&format!("/posts/{post_id}")))
        .bearer_auth(&other)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .delete(srv.url(&format!("/posts/{post_id}")))
        .bearer_auth(&author)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(srv.url(&format!("/posts/{post_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn posts_cannot_borrow_someone_elses_image() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    srv.seed_user(30, "owner@example.com").await;
    srv.seed_user(31, "intruder@example.com").await;
    let owner = mint_jwt(30);
    let intruder = mint_jwt(31);

    let res = client
        .post(srv.url("/users/profile/avatar"))
        .bearer_auth(&owner)
        .multipart(image_form(PNG_BYTES.to_vec(), "image/png"))
        .send()
        .await
        .unwrap();
    let avatar: Value = res.json().await.unwrap();
    let avatar_id = avatar["files"][0]["fileId"].as_str().unwrap().to_string();
    let avatar_url = avatar["files"][0]["url"].as_str().unwrap().to_string();

    let res = client
        .post(srv.url("/posts/image"))
        .bearer_auth(&owner)
        .multipart(image_form(PNG_BYTES.to_vec(), "image/png"))
        .send()
        .await
        .unwrap();
    let image: Value = res.json().await.unwrap();
    let image_id = image["imageId"].as_str().unwrap().to_string();

    for id in [&avatar_id, &image_id] {
        let res = client
            .post(srv.url("/posts"))
            .bearer_auth(&intruder)
            .json(&json!({ "imageId": id }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    // 头像不能作为帖子配图，本人也不行
    let res = client
        .post(srv.url("/posts"))
        .bearer_auth(&owner)
        .json(&json!({ "imageId": avatar_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client.get(srv.url(&avatar_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn post_requests_are_validated() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    srv.seed_user(12, "twelve@example.com").await;
    let token = mint_jwt(12);

    let res = client
        .post(srv.url("/posts"))
        .bearer_auth(&token)
        .json(&json!({ "imageId": uuid::Uuid::new_v4() }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .post(srv.url("/posts"))
        .bearer_auth(&token)
        .json(&json!({ "imageId": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(srv.url("/posts/not-a-uuid"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn auth_flows_deliver_notifications_through_the_forwarder() {
    let mut srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    srv.seed_user(20, "mail@example.com").await;

    let res = client
        .post(srv.url("/auth/registration-email-resending"))
        .json(&json!({ "email": "mail@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let msg = srv.next_notification().await;
    assert_eq!(msg.pattern, RoutingKey::EMAIL_CONFIRMATION);
    assert_eq!(msg.data["email"], "mail@example.com");

    let res = client
        .post(srv.url("/auth/password-recovery"))
        .json(&json!({ "email": "mail@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let msg = srv.next_notification().await;
    assert_eq!(msg.pattern, RoutingKey::EMAIL_RECOVERY);

    for path in ["/auth/registration-email-resending", "/auth/password-recovery"] {
        let res = client
            .post(srv.url(path))
            .json(&json!({ "email": "nobody@example.com" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    let res = client
        .post(srv.url("/auth/password-recovery"))
        .json(&json!({ "email": "not an email" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
