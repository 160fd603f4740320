use super::{json_body, non_blank};
use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::state::AppState;
use crate::upload::read_image;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use snapix_application::command_bus::CommandBus;
use snapix_application::context::AppContext;
use snapix_application::files::{AvatarViewDto, DeleteAvatarFileCommand};
use snapix_application::query_bus::QueryBus;
use snapix_application::users::{
    CountRegisteredUsersQuery, FillOutProfileCommand, GetAvatarQuery, GetProfileInfoQuery,
    RegisteredUsersCountDto, UploadAvatarCommand, UserProfileViewDto,
};
use snapix_domain::user::{AboutMe, City, DateOfBirth, PersonName, ProfileDetails, Username};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub city: Option<String>,
    pub about_me: Option<String>,
}

impl UpdateProfileDto {
    fn into_details(self, today: NaiveDate) -> Result<ProfileDetails, ApiError> {
        Ok(ProfileDetails {
            username: Username::parse(self.username)?,
            first_name: PersonName::parse(self.first_name)?,
            last_name: PersonName::parse(self.last_name)?,
            date_of_birth: self
                .date_of_birth
                .map(|d| DateOfBirth::parse(d, today))
                .transpose()?,
            city: non_blank(self.city).map(City::parse).transpose()?,
            about_me: self.about_me.map(AboutMe::parse).transpose()?,
        })
    }
}

pub async fn count_registered_users(
    State(state): State<AppState>,
) -> Result<Json<RegisteredUsersCountDto>, ApiError> {
    let dto = state
        .queries
        .dispatch(&AppContext::default(), CountRegisteredUsersQuery)
        .await?;
    Ok(Json(dto))
}

pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<UserProfileViewDto>, ApiError> {
    let view = state
        .queries
        .dispatch(
            &user.context(),
            GetProfileInfoQuery {
                user_id: user.user_id,
            },
        )
        .await?;
    Ok(Json(view))
}

pub async fn fill_out_profile(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<UpdateProfileDto>, JsonRejection>,
) -> Result<Json<UserProfileViewDto>, ApiError> {
    let details = json_body(body)?.into_details(Utc::now().date_naive())?;
    let view = state
        .commands
        .dispatch(
            &user.context(),
            FillOutProfileCommand {
                user_id: user.user_id,
                details,
            },
        )
        .await?;
    Ok(Json(view))
}

pub async fn get_avatar(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<AvatarViewDto>, ApiError> {
    let view = state
        .queries
        .dispatch(
            &user.context(),
            GetAvatarQuery {
                user_id: user.user_id,
            },
        )
        .await?;
    Ok(Json(view))
}

pub async fn upload_avatar(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<AvatarViewDto>), ApiError> {
    let upload = read_image(multipart).await?;
    let view = state
        .commands
        .dispatch(
            &user.context(),
            UploadAvatarCommand {
                owner_id: user.user_id,
                upload,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn delete_avatar(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<StatusCode, ApiError> {
    state
        .commands
        .dispatch(
            &user.context(),
            DeleteAvatarFileCommand {
                owner_id: user.user_id,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
