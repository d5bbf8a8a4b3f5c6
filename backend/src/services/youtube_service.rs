use reqwest::Client;
use serde_json::Value;

use crate::config::YOUTUBE_API_KEY;
use crate::models::{ApiError, RawSearchHit, RawVideoStats};
use crate::utils::parse_published_at;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const VIDEOS_URL: &str = "https://www.googleapis.com/youtube/v3/videos";
const SUGGEST_URL: &str = "https://suggestqueries.google.com/complete/search";

/// Search for videos matching a keyword.
///
/// Documentation: https://developers.google.com/youtube/v3/docs/search
pub async fn search(
    client: &Client,
    keyword: &str,
    page_token: Option<&str>,
    max_results: usize,
) -> Result<(Vec<RawSearchHit>, Option<String>), ApiError> {
    let api_key = &*YOUTUBE_API_KEY;
    let max_results = max_results.to_string();

    let mut params = vec![
        ("part", "snippet"),
        ("type", "video"),
        ("q", keyword),
        ("maxResults", max_results.as_str()),
        ("key", api_key.as_str()),
    ];
    if let Some(token) = page_token {
        params.push(("pageToken", token));
    }

    let response = client.get(SEARCH_URL).query(&params).send().await?;
    if !response.status().is_success() {
        return Err(ApiError::Upstream(format!(
            "search request failed with status {}",
            response.status()
        )));
    }
    let body = response.json::<Value>().await?;

    let next_page_token = body["nextPageToken"].as_str().map(str::to_string);
    let hits = body["items"]
        .as_array()
        .map(|items| items.iter().filter_map(parse_search_hit).collect())
        .unwrap_or_default();

    Ok((hits, next_page_token))
}

fn parse_search_hit(item: &Value) -> Option<RawSearchHit> {
    let id = item["id"]["videoId"].as_str()?;
    let snippet = &item["snippet"];

    Some(RawSearchHit {
        id: id.to_string(),
        title: snippet["title"].as_str().unwrap_or("").to_string(),
        description: snippet["description"].as_str().unwrap_or("").to_string(),
        thumbnail_url: snippet["thumbnails"]["high"]["url"]
            .as_str()
            .unwrap_or("")
            .to_string(),
        published_at: parse_published_at(snippet["publishedAt"].as_str().unwrap_or("")),
        channel_title: snippet["channelTitle"].as_str().unwrap_or("").to_string(),
    })
}

/// Fetch statistics and content details for a batch of video ids.
///
/// Ids unknown to the upstream are simply absent from the response; the
/// caller decides what a missing record means.
///
/// Documentation: https://developers.google.com/youtube/v3/docs/videos
pub async fn fetch_details(
    client: &Client,
    ids: &[String],
) -> Result<Vec<RawVideoStats>, ApiError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let api_key = &*YOUTUBE_API_KEY;
    let id_list = ids.join(",");

    let response = client
        .get(VIDEOS_URL)
        .query(&[
            ("part", "statistics,contentDetails"),
            ("id", id_list.as_str()),
            ("key", api_key.as_str()),
        ])
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(ApiError::Upstream(format!(
            "videos request failed with status {}",
            response.status()
        )));
    }
    let body = response.json::<Value>().await?;

    let stats = body["items"]
        .as_array()
        .map(|items| items.iter().filter_map(parse_video_stats).collect())
        .unwrap_or_default();

    Ok(stats)
}

fn parse_video_stats(item: &Value) -> Option<RawVideoStats> {
    let id = item["id"].as_str()?;
    let statistics = &item["statistics"];

    Some(RawVideoStats {
        id: id.to_string(),
        views: count_field(statistics, "viewCount"),
        likes: count_field(statistics, "likeCount"),
        comments: count_field(statistics, "commentCount"),
        duration: item["contentDetails"]["duration"]
            .as_str()
            .unwrap_or("")
            .to_string(),
    })
}

/// Statistics counters arrive as strings on the wire.
fn count_field(statistics: &Value, field: &str) -> i64 {
    statistics[field]
        .as_str()
        .unwrap_or("0")
        .parse()
        .unwrap_or(0)
}

/// Passthrough to the suggest endpoint backing search autocomplete. The
/// response is a bare JSON array; its second element holds the suggestions.
pub async fn suggestions(client: &Client, keyword: &str) -> Result<Vec<String>, ApiError> {
    let response = client
        .get(SUGGEST_URL)
        .query(&[("client", "firefox"), ("ds", "yt"), ("q", keyword)])
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(ApiError::Upstream(format!(
            "suggest request failed with status {}",
            response.status()
        )));
    }
    let body = response.json::<Value>().await?;

    let suggestions = body[1]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(suggestions)
}
