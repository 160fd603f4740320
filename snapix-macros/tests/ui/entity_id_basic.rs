use snapix_macros::entity_id;
use uuid::Uuid;

#[entity_id]
struct UserId(i64);

#[entity_id(debug = false)]
struct PostId(Uuid);

impl std::fmt::Debug for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PostId(..)")
    }
}

fn main() {
    let id = UserId::new(7);
    assert_eq!(id.value(), 7);
    assert_eq!(id.to_string(), "7");
    assert_eq!("7".parse::<UserId>().unwrap(), id);

    // 透明序列化：直接输出内部值
    assert_eq!(serde_json::to_string(&id).unwrap(), "7");

    let raw: i64 = id.into();
    assert_eq!(raw, 7);

    let pid = PostId::new(Uuid::new_v4());
    let copied = pid;
    assert_eq!(copied, pid);
    let _ = format!("{:?}", pid);
}
