use log::error;
use rocket::serde::json::Json;
use rocket::{get, FromForm, State};

use crate::models::{ApiError, RankedPage};
use crate::services::ranking_service;
use crate::AppState;

#[derive(Debug, FromForm)]
pub struct VideoQuery {
    pub keyword: Option<String>,
    #[field(name = "pageToken")]
    pub page_token: Option<String>,
}

/// Search videos for a keyword and rank them by performance score.
#[get("/videos?<query..>")]
pub async fn search_videos(
    query: VideoQuery,
    state: &State<AppState>,
) -> Result<Json<RankedPage>, ApiError> {
    let keyword = query.keyword.unwrap_or_default();

    match ranking_service::search_videos(state, &keyword, query.page_token.as_deref()).await {
        Ok(page) => Ok(Json(page)),
        Err(e) => {
            error!("Video search failed: {e}");
            Err(e)
        }
    }
}
