use crate::routes::{auth, posts, system, users};
use crate::state::Runtime;
use axum::Router;
use axum::routing::{get, post};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// 构建完整路由表；设置了 `GLOBAL_PREFIX` 时整体挂在前缀之下
pub fn build_app(runtime: &Runtime) -> Router {
    let api = Router::new()
        .route(
            "/users/count-register-users",
            get(users::count_registered_users),
        )
        .route(
            "/users/profile",
            get(users::get_profile).put(users::fill_out_profile),
        )
        .route(
            "/users/profile/avatar",
            get(users::get_avatar)
                .post(users::upload_avatar)
                .delete(users::delete_avatar),
        )
        .route("/posts", post(posts::create_post))
        .route("/posts/image", post(posts::upload_image))
        .route(
            "/posts/{id}",
            get(posts::get_post).delete(posts::delete_post),
        )
        .route(
            "/auth/registration-email-resending",
            post(auth::resend_confirmation_code),
        )
        .route("/auth/password-recovery", post(auth::recover_password))
        .route("/health", get(system::health))
        .nest_service("/files", ServeDir::new(&runtime.storage_root))
        .with_state(runtime.state.clone());

    let app = if runtime.prefix.is_empty() {
        api
    } else {
        Router::new().nest(&runtime.prefix, api)
    };

    app.layer(TraceLayer::new_for_http())
}
