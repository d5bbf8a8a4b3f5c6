use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::debug;

use crate::models::{ApiError, RankedPage, RawSearchHit, RawVideoStats, ScoredVideo};
use crate::scoring::{self, ScoreInputs, ScoringConfig};
use crate::services::youtube_service;
use crate::utils::parse_duration_seconds;
use crate::AppState;

/// What to do with a search hit that has no matching statistics record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinGapPolicy {
    /// Exclude the hit from the page.
    Drop,
    /// Keep the hit, scored with zeroed statistics.
    Placeholder,
    /// Fail the whole page.
    Error,
}

impl JoinGapPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "drop" => Some(Self::Drop),
            "placeholder" => Some(Self::Placeholder),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

pub fn validate_keyword(keyword: &str) -> Result<(), ApiError> {
    if keyword.trim().is_empty() {
        return Err(ApiError::Validation("keyword".to_string()));
    }
    Ok(())
}

/// Full pipeline for one search request: validate the keyword, fetch the
/// search page, filter by title, fetch details for the survivors, then
/// join and score.
pub async fn search_videos(
    state: &AppState,
    keyword: &str,
    page_token: Option<&str>,
) -> Result<RankedPage, ApiError> {
    validate_keyword(keyword)?;

    let (hits, next_page_token) =
        youtube_service::search(&state.http, keyword, page_token, state.page_size).await?;

    let matching = filter_by_title(hits, keyword);
    if matching.is_empty() {
        return Ok(RankedPage {
            videos: Vec::new(),
            next_page_token,
        });
    }

    let ids: Vec<String> = matching.iter().map(|hit| hit.id.clone()).collect();
    let stats = youtube_service::fetch_details(&state.http, &ids).await?;

    build_ranked_page(
        keyword,
        matching,
        stats,
        Utc::now(),
        next_page_token,
        &state.scoring,
        state.join_gap,
    )
}

/// Keep only hits whose title contains the keyword as a case-sensitive
/// substring.
pub fn filter_by_title(hits: Vec<RawSearchHit>, keyword: &str) -> Vec<RawSearchHit> {
    hits.into_iter()
        .filter(|hit| hit.title.contains(keyword))
        .collect()
}

/// Compose a ranked page out of raw upstream records. Pure over its
/// inputs; `now` is injected by the caller so scoring stays reproducible.
pub fn build_ranked_page(
    keyword: &str,
    hits: Vec<RawSearchHit>,
    stats: Vec<RawVideoStats>,
    now: DateTime<Utc>,
    next_page_token: Option<String>,
    config: &ScoringConfig,
    join_gap: JoinGapPolicy,
) -> Result<RankedPage, ApiError> {
    validate_keyword(keyword)?;

    let mut stats_by_id: HashMap<String, RawVideoStats> = stats
        .into_iter()
        .map(|record| (record.id.clone(), record))
        .collect();

    let mut videos = Vec::new();
    for hit in hits {
        if !hit.title.contains(keyword) {
            continue;
        }

        let stats = match stats_by_id.remove(&hit.id) {
            Some(record) => record,
            None => match join_gap {
                JoinGapPolicy::Drop => {
                    debug!("Dropping hit {} without a detail record", hit.id);
                    continue;
                }
                JoinGapPolicy::Placeholder => empty_stats(&hit.id),
                JoinGapPolicy::Error => return Err(ApiError::JoinGap(hit.id)),
            },
        };

        videos.push(score_video(hit, &stats, keyword, now, config));
    }

    // Stable sort keeps join order for equal view counts.
    videos.sort_by(|a, b| b.views.cmp(&a.views));

    Ok(RankedPage {
        videos,
        next_page_token,
    })
}

fn empty_stats(id: &str) -> RawVideoStats {
    RawVideoStats {
        id: id.to_string(),
        views: 0,
        likes: 0,
        comments: 0,
        duration: String::new(),
    }
}

fn score_video(
    hit: RawSearchHit,
    stats: &RawVideoStats,
    keyword: &str,
    now: DateTime<Utc>,
    config: &ScoringConfig,
) -> ScoredVideo {
    let duration_seconds = parse_duration_seconds(&stats.duration);
    let average_view_duration =
        duration_seconds as f64 * scoring::estimated_watch_rate(duration_seconds);
    let days_since_posted = scoring::days_since(hit.published_at, now);

    let performance_score = scoring::performance_score(
        &ScoreInputs {
            views: stats.views,
            likes: stats.likes,
            comments: stats.comments,
            duration_seconds,
            average_view_duration,
            days_since_posted,
            title: &hit.title,
            keyword,
            published_at: hit.published_at,
        },
        config,
    );

    ScoredVideo {
        video_id: hit.id,
        title: hit.title,
        description: hit.description,
        thumbnail: hit.thumbnail_url,
        published_at: hit.published_at,
        channel_title: hit.channel_title,
        views: stats.views,
        likes: stats.likes,
        comments: stats.comments,
        video_length: duration_seconds,
        performance_score,
    }
}
