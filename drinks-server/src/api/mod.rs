pub(crate) mod drinks;

use crate::auth::middleware::authorize;
use crate::auth::permissions;
use crate::errors::ApiError;
use crate::state::AppState;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::routing::{delete, get, patch, post};
use axum::{middleware, Router};

/// Combines all API routes into a single router.
///
/// Each protected route carries its own authorization guard, composed here
/// at registration time with the permission that route requires. The guard
/// wraps only the matched method, so an unauthenticated GET /drinks is
/// unaffected by the guard on POST /drinks.
pub(super) fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/drinks", get(drinks::get_drinks))
        .route(
            "/drinks",
            post(drinks::create_drink).route_layer(middleware::from_fn({
                let state = state.clone();
                move |req: Request<Body>, next: Next| {
                    authorize(state.clone(), permissions::POST_DRINKS, req, next)
                }
            })),
        )
        .route(
            "/drinks-detail",
            get(drinks::get_drinks_detail).route_layer(middleware::from_fn({
                let state = state.clone();
                move |req: Request<Body>, next: Next| {
                    authorize(state.clone(), permissions::GET_DRINKS_DETAIL, req, next)
                }
            })),
        )
        .route(
            "/drinks/{drink_id}",
            patch(drinks::update_drink).route_layer(middleware::from_fn({
                let state = state.clone();
                move |req: Request<Body>, next: Next| {
                    authorize(state.clone(), permissions::PATCH_DRINKS, req, next)
                }
            })),
        )
        .route(
            "/drinks/{drink_id}",
            delete(drinks::delete_drink).route_layer(middleware::from_fn({
                let state = state.clone();
                move |req: Request<Body>, next: Next| {
                    authorize(state.clone(), permissions::DELETE_DRINKS, req, next)
                }
            })),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}
