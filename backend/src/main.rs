#[macro_use]
extern crate rocket;

mod api;
mod config;
mod models;
mod scoring;
mod services;
mod utils;

use reqwest::Client;

use crate::scoring::ScoringConfig;
use crate::services::ranking_service::JoinGapPolicy;

pub struct AppState {
    pub http: Client,
    pub scoring: ScoringConfig,
    pub join_gap: JoinGapPolicy,
    pub page_size: usize,
}

#[launch]
fn rocket() -> _ {
    config::load_environment();
    config::init_logger();

    let state = config::create_app_state().expect("Application state setup failed.");
    let cors = config::create_cors().expect("CORS setup failed.");

    rocket::build()
        .manage(state)
        .attach(cors)
        .mount("/api", routes![api::search_videos, api::autocomplete])
}
