use log::error;
use rocket::serde::json::Json;
use rocket::{get, State};

use crate::models::{ApiError, SuggestionsResponse};
use crate::services::ranking_service::validate_keyword;
use crate::services::youtube_service;
use crate::AppState;

/// Autocomplete passthrough for the search box.
#[get("/autocomplete?<keyword>")]
pub async fn autocomplete(
    keyword: Option<String>,
    state: &State<AppState>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let keyword = keyword.unwrap_or_default();
    validate_keyword(&keyword)?;

    match youtube_service::suggestions(&state.http, &keyword).await {
        Ok(suggestions) => Ok(Json(SuggestionsResponse { suggestions })),
        Err(e) => {
            error!("Autocomplete lookup failed: {e}");
            Err(e)
        }
    }
}
