use crate::errors::ApiError;
use crate::models::{Ingredient, LongDrink, ShortDrink};
use crate::openapi::DRINKS_TAG;
use crate::state::AppState;
use crate::store::{StoreBackend, StoreError};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request payload for creating a drink. Both fields are required; they
/// are optional here so that their absence maps to a 400 rather than a
/// deserialization rejection.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub(crate) struct CreateDrinkPayload {
    /// Name of the new drink
    pub title: Option<String>,
    /// Full recipe of the new drink
    pub recipe: Option<Vec<Ingredient>>,
}

/// Request payload for updating a drink; either field may be omitted
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub(crate) struct UpdateDrinkPayload {
    /// Replacement title, if any
    pub title: Option<String>,
    /// Replacement recipe; replaces all prior ingredients wholesale
    pub recipe: Option<Vec<Ingredient>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShortDrinksResponse {
    pub success: bool,
    pub drinks: Vec<ShortDrink>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LongDrinksResponse {
    pub success: bool,
    pub drinks: Vec<LongDrink>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatedDrinkResponse {
    pub success: bool,
    pub created_drink_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatedDrinkResponse {
    pub success: bool,
    pub updated_drink_id: i64,
    pub old_drink: LongDrink,
    pub new_drink: LongDrink,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeletedDrinkResponse {
    pub success: bool,
    pub deleted_drink_id: i64,
}

#[utoipa::path(
    get,
    path = "/drinks",
    tag = DRINKS_TAG,
    responses(
        (status = 200, description = "All drinks in short form", body = ShortDrinksResponse),
    )
)]
pub(super) async fn get_drinks(State(state): State<AppState>) -> Response {
    let drinks = state.store.list().await;
    let response = ShortDrinksResponse {
        success: true,
        drinks: drinks.iter().map(|drink| drink.short_form()).collect(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

#[utoipa::path(
    get,
    path = "/drinks-detail",
    tag = DRINKS_TAG,
    params(
        ("Authorization" = String, Header, description = "Bearer token with get:drinks-detail"),
    ),
    responses(
        (status = 200, description = "All drinks in long form", body = LongDrinksResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Token lacks the required permission"),
    )
)]
pub(super) async fn get_drinks_detail(State(state): State<AppState>) -> Response {
    let drinks = state.store.list().await;
    let response = LongDrinksResponse {
        success: true,
        drinks: drinks.iter().map(|drink| drink.long_form()).collect(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

#[utoipa::path(
    post,
    path = "/drinks",
    tag = DRINKS_TAG,
    request_body = CreateDrinkPayload,
    params(
        ("Authorization" = String, Header, description = "Bearer token with post:drinks"),
    ),
    responses(
        (status = 200, description = "Drink created", body = CreatedDrinkResponse),
        (status = 400, description = "Title or recipe missing or malformed"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Token lacks the required permission"),
    )
)]
pub(super) async fn create_drink(
    State(state): State<AppState>,
    payload: Result<Json<CreateDrinkPayload>, JsonRejection>,
) -> Response {
    let Ok(Json(payload)) = payload else {
        return ApiError::bad_request().into_response();
    };
    let (Some(title), Some(recipe)) = (payload.title, payload.recipe) else {
        return ApiError::bad_request().into_response();
    };

    let drink = state.store.create(title, recipe).await;
    let response = CreatedDrinkResponse {
        success: true,
        created_drink_id: drink.id,
    };
    (StatusCode::OK, Json(response)).into_response()
}

#[utoipa::path(
    patch,
    path = "/drinks/{drink_id}",
    tag = DRINKS_TAG,
    request_body = UpdateDrinkPayload,
    params(
        ("drink_id" = i64, Path, description = "Identifier of the drink to update"),
        ("Authorization" = String, Header, description = "Bearer token with patch:drinks"),
    ),
    responses(
        (status = 200, description = "Drink updated", body = UpdatedDrinkResponse),
        (status = 400, description = "Malformed request body"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Token lacks the required permission"),
        (status = 404, description = "Drink id is not an integer"),
        (status = 422, description = "No drink with the given id"),
    )
)]
pub(super) async fn update_drink(
    State(state): State<AppState>,
    drink_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateDrinkPayload>, JsonRejection>,
) -> Response {
    // A non-integer id never names a drink, same as an unmatched route
    let Ok(Path(drink_id)) = drink_id else {
        return ApiError::not_found().into_response();
    };
    let Ok(Json(payload)) = payload else {
        return ApiError::bad_request().into_response();
    };

    match state
        .store
        .replace(drink_id, payload.title, payload.recipe)
        .await
    {
        Ok((old, new)) => {
            let response = UpdatedDrinkResponse {
                success: true,
                updated_drink_id: drink_id,
                old_drink: old.long_form(),
                new_drink: new.long_form(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(StoreError::NotFound(_)) => ApiError::unprocessable_entity().into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/drinks/{drink_id}",
    tag = DRINKS_TAG,
    params(
        ("drink_id" = i64, Path, description = "Identifier of the drink to delete"),
        ("Authorization" = String, Header, description = "Bearer token with delete:drinks"),
    ),
    responses(
        (status = 200, description = "Drink deleted", body = DeletedDrinkResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Token lacks the required permission"),
        (status = 404, description = "Drink id is not an integer"),
        (status = 422, description = "No drink with the given id"),
    )
)]
pub(super) async fn delete_drink(
    State(state): State<AppState>,
    drink_id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Ok(Path(drink_id)) = drink_id else {
        return ApiError::not_found().into_response();
    };
    match state.store.delete(drink_id).await {
        Ok(deleted_id) => {
            let response = DeletedDrinkResponse {
                success: true,
                deleted_drink_id: deleted_id,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(StoreError::NotFound(_)) => ApiError::unprocessable_entity().into_response(),
    }
}
