use super::json_body;
use crate::auth::{AuthUser, request_id};
use crate::errors::ApiError;
use crate::state::AppState;
use crate::upload::read_image;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;
use snapix_application::command_bus::CommandBus;
use snapix_application::context::AppContext;
use snapix_application::posts::{
    CreatePostCommand, DeletePostCommand, GetPostQuery, PostImageViewDto, PostViewDto,
    UploadPostImageCommand,
};
use snapix_application::query_bus::QueryBus;
use snapix_domain::domain_event::BusinessContext;
use snapix_domain::file::FileId;
use snapix_domain::post::{PostContent, PostId};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostDto {
    pub content: Option<String>,
    pub image_id: Uuid,
}

fn post_id(raw: &str) -> Result<PostId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("'{raw}' is not a valid post id")))
}

pub async fn upload_image(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PostImageViewDto>), ApiError> {
    let upload = read_image(multipart).await?;
    let view = state
        .commands
        .dispatch(
            &user.context(),
            UploadPostImageCommand {
                owner_id: user.user_id,
                upload,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn create_post(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<CreatePostDto>, JsonRejection>,
) -> Result<(StatusCode, Json<PostViewDto>), ApiError> {
    let dto = json_body(body)?;
    let content = dto.content.map(PostContent::parse).transpose()?;

    let view = state
        .commands
        .dispatch(
            &user.context(),
            CreatePostCommand {
                author_id: user.user_id,
                image_id: FileId::new(dto.image_id),
                content,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<PostViewDto>, ApiError> {
    let ctx = AppContext {
        biz: BusinessContext::builder()
            .maybe_correlation_id(request_id(&headers))
            .build(),
        user_id: None,
    };
    let view = state
        .queries
        .dispatch(&ctx, GetPostQuery { post_id: post_id(&id)? })
        .await?;
    Ok(Json(view))
}

pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .commands
        .dispatch(
            &user.context(),
            DeletePostCommand {
                post_id: post_id(&id)?,
                user_id: user.user_id,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
