use axum::Router;
use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::response::Response;
use axum::routing::get;
use common::{ImageName, Stage};
use tower_http::services::{ServeDir, ServeFile};

use crate::error::AppError;
use crate::state::AppState;

/// Static routes: every stage directory under its own name, then the
/// compiled frontend with `index.html` answering any other path.
pub fn routes(state: &AppState) -> Router {
    let dist = &state.config.frontend.dist_dir;

    let router = Stage::ALL.into_iter().fold(Router::new(), |router, stage| {
        router.nest(&format!("/{}", stage.dir_name()), stage_files(stage))
    });

    router
        .fallback_service(ServeDir::new(dist).fallback(ServeFile::new(dist.join("index.html"))))
        .with_state(state.clone())
}

/// Files of one stage. Only names a listing would report are served.
fn stage_files(stage: Stage) -> Router<AppState> {
    Router::new().route(
        "/{imageName}",
        get(
            move |State(state): State<AppState>, Path(name): Path<String>, req: Request| {
                serve_stage_file(state, stage, name, req)
            },
        ),
    )
}

async fn serve_stage_file(
    state: AppState,
    stage: Stage,
    raw_name: String,
    req: Request,
) -> Result<Response, AppError> {
    let servable = ImageName::parse(&raw_name).is_ok_and(|name| !state.store.is_hidden(&name));
    if !servable {
        return Err(AppError::NotFound(format!(
            "{raw_name} does not exist in stage {stage}"
        )));
    }

    // Nesting strips the stage prefix, so the request path is `/<name>`.
    let res = ServeDir::new(state.store.stage_dir(stage))
        .try_call(req)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(res.map(Body::new))
}
