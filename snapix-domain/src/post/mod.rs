//! 帖子聚合
mod events;
mod model;

pub use events::{PostCreated, PostDeleted};
pub use model::{NewPost, Post, PostContent, PostId};
