use utoipa::OpenApi;

pub(crate) const DRINKS_TAG: &str = "Drinks API";

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = DRINKS_TAG, description = "Drink catalog endpoints"),
    ),
    info(
        title = "Drinks API",
        description = "Drink catalog with role-based access control",
        version = "1.0.0"
    )
)]
pub(crate) struct ApiDoc;
