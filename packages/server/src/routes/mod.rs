use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers::{images, metadata, transitions};
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(image_routes(config))
        .merge(metadata_routes())
        .merge(transition_routes())
}

fn image_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let listing = OpenApiRouter::new()
        .routes(routes!(images::list_gallery_images))
        .routes(routes!(images::list_edited_images))
        .routes(routes!(images::list_original_images))
        .routes(routes!(images::list_complete_images))
        .routes(routes!(images::delete_image));

    let upload = OpenApiRouter::new()
        .routes(routes!(images::upload_image))
        .layer(images::upload_body_limit(config.server.max_upload_size));

    listing.merge(upload)
}

fn metadata_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(metadata::get_gallery_metadata))
        .routes(routes!(metadata::get_gallery_metadata_default_lang))
        .routes(routes!(metadata::get_edited_metadata))
        .routes(routes!(metadata::get_edited_metadata_default_lang))
        .routes(routes!(metadata::delete_all_metadata))
}

fn transition_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(transitions::copy_image_for_editing))
        .routes(routes!(transitions::move_image_back_for_editing))
        .routes(routes!(transitions::move_image_to_image_gallery))
        .routes(routes!(transitions::move_image_to_images_complete))
}
