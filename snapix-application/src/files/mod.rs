//! 图片文件用例：头像删除、上传校验与存储门面
//!
mod delete_avatar_file;
mod facade;
mod upload;
mod views;

pub use delete_avatar_file::{DeleteAvatarFileCommand, DeleteAvatarFileHandler};
pub use facade::ImageFilesFacade;
pub use upload::ImageUpload;
pub use views::{AvatarViewDto, ImageFileView};
