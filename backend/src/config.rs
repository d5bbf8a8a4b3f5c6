use crate::scoring::ScoringConfig;
use crate::services::ranking_service::JoinGapPolicy;
use crate::AppState;
use anyhow::Result;
use chrono::{FixedOffset, Local, Offset};
use env_logger::Builder;
use lazy_static::lazy_static;
use log::{info, warn, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;
use std::time::Duration;

lazy_static! {
    pub static ref YOUTUBE_API_KEY: String =
        env::var("YOUTUBE_API_KEY").expect("YOUTUBE_API_KEY environment variable must be set");
    pub static ref SUBSCRIBER_BASELINE: i64 = env::var("SUBSCRIBER_BASELINE")
        .unwrap_or_else(|_| "10000".to_string())
        .parse::<i64>()
        .unwrap_or(10000);
    pub static ref UPSTREAM_TIMEOUT_SECS: u64 = env::var("UPSTREAM_TIMEOUT_SECS")
        .unwrap_or_else(|_| "10".to_string())
        .parse::<u64>()
        .unwrap_or(10);
    pub static ref SEARCH_PAGE_SIZE: usize = env::var("SEARCH_PAGE_SIZE")
        .unwrap_or_else(|_| "10".to_string())
        .parse::<usize>()
        .unwrap_or(10);
    pub static ref ALLOWED_ORIGIN: String =
        env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());
}

pub fn init_logger() {
    Builder::new().filter_level(LevelFilter::Info).init();
    info!("Starting Rocket backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

/// Offset used to resolve the wall-clock hour for the upload-time bonus.
/// Defaults to the offset this process runs in; set TIME_BONUS_UTC_OFFSET
/// (e.g. "+09:00") to pin scoring to one zone across deployments.
pub fn time_bonus_offset() -> FixedOffset {
    match env::var("TIME_BONUS_UTC_OFFSET") {
        Ok(raw) => raw.parse::<FixedOffset>().unwrap_or_else(|_| {
            warn!("Unparseable TIME_BONUS_UTC_OFFSET {raw:?}, using the local offset");
            Local::now().offset().fix()
        }),
        Err(_) => Local::now().offset().fix(),
    }
}

pub fn join_gap_policy() -> JoinGapPolicy {
    match env::var("JOIN_GAP_POLICY") {
        Ok(raw) => JoinGapPolicy::parse(&raw).unwrap_or_else(|| {
            warn!("Unknown JOIN_GAP_POLICY {raw:?}, using drop");
            JoinGapPolicy::Drop
        }),
        Err(_) => JoinGapPolicy::Drop,
    }
}

pub fn create_app_state() -> Result<AppState> {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(*UPSTREAM_TIMEOUT_SECS))
        .build()?;

    Ok(AppState {
        http,
        scoring: ScoringConfig {
            subscriber_baseline: *SUBSCRIBER_BASELINE,
            utc_offset: time_bonus_offset(),
        },
        join_gap: join_gap_policy(),
        page_size: *SEARCH_PAGE_SIZE,
    })
}

pub fn create_cors() -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::some_exact(&[ALLOWED_ORIGIN.as_str()]))
        .allowed_methods(
            vec![Method::Get, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&[
            "Authorization",
            "Accept",
            "Content-Type",
        ]))
        .allow_credentials(true)
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}
