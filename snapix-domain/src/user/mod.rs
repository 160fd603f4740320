//! 用户资料聚合
mod profile;
mod value_objects;

pub use profile::{ProfileDetails, RECOVERY_CODE_TTL_MINUTES, UserId, UserProfile};
pub use value_objects::{AboutMe, City, DateOfBirth, Email, PersonName, Username};
