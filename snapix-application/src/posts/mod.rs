//! 帖子用例：图片上传、发帖、查看、删除，以及帖子创建后的图片关联
//!
mod attach_post_image;
mod create_post;
mod delete_post;
mod get_post;
mod upload_post_image;
mod views;

pub use attach_post_image::AttachPostImageListener;
pub use create_post::{CreatePostCommand, CreatePostHandler};
pub use delete_post::{DeletePostCommand, DeletePostHandler};
pub use get_post::{GetPostHandler, GetPostQuery};
pub use upload_post_image::{UploadPostImageCommand, UploadPostImageHandler};
pub use views::{PostImageViewDto, PostViewDto};
