//! 用户资料用例
//!
mod count_registered_users;
mod fill_out_profile;
mod get_avatar;
mod get_profile_info;
mod upload_avatar;
mod views;

pub use count_registered_users::{CountRegisteredUsersHandler, CountRegisteredUsersQuery};
pub use fill_out_profile::{FillOutProfileCommand, FillOutProfileHandler};
pub use get_avatar::{GetAvatarHandler, GetAvatarQuery};
pub use get_profile_info::{GetProfileInfoHandler, GetProfileInfoQuery};
pub use upload_avatar::{UploadAvatarCommand, UploadAvatarHandler};
pub use views::{RegisteredUsersCountDto, UserProfileViewDto};
