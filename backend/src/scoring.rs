use chrono::{DateTime, FixedOffset, Timelike, Utc};

/// Per-component ceilings. They sum to 100 together with the keyword and
/// upload-time bonuses, which bounds the final score.
const MAX_VELOCITY_SCORE: f64 = 30.0;
const MAX_RETENTION_SCORE: f64 = 20.0;
const MAX_ENGAGEMENT_SCORE: f64 = 20.0;
const MAX_AUDIENCE_SCORE: f64 = 20.0;
const KEYWORD_MATCH_SCORE: f64 = 5.0;

/// Scoring tunables, resolved once at startup so the functions below stay
/// pure over their arguments.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Stand-in for per-channel subscriber counts, which neither the search
    /// nor the videos endpoint exposes. TODO: replace with a channels.list
    /// lookup once channel statistics are fetched alongside video details.
    pub subscriber_baseline: i64,
    /// Offset used to resolve the wall-clock hour for the upload-time bonus.
    pub utc_offset: FixedOffset,
}

/// Per-video inputs to the aggregate score.
#[derive(Debug, Clone)]
pub struct ScoreInputs<'a> {
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub duration_seconds: i64,
    pub average_view_duration: f64,
    pub days_since_posted: i64,
    pub title: &'a str,
    pub keyword: &'a str,
    pub published_at: DateTime<Utc>,
}

/// Assumed fraction of a video the average viewer sits through, bucketed
/// by length. Shorter videos hold a larger share of their runtime.
pub fn estimated_watch_rate(duration_seconds: i64) -> f64 {
    if duration_seconds <= 180 {
        0.6
    } else if duration_seconds <= 600 {
        0.5
    } else if duration_seconds <= 1200 {
        0.4
    } else {
        0.3
    }
}

/// Flat bonus for videos published between 18:00 and 21:59 wall-clock time
/// in the given offset.
pub fn upload_time_bonus(published_at: DateTime<Utc>, offset: FixedOffset) -> i64 {
    let hour = published_at.with_timezone(&offset).hour();
    if (18..=21).contains(&hour) {
        5
    } else {
        0
    }
}

/// Whole days elapsed between publish and `now`, rounded up and floored at
/// one so the result is always safe as a divisor.
pub fn days_since(published_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (now - published_at).num_seconds().abs();
    let days = (seconds + 86_399) / 86_400;
    days.max(1)
}

/// Combine view velocity, retention, engagement, audience reach, keyword
/// relevance and the upload-time bonus into one integer in [0, 100].
/// Each component is clamped to its own range before summing.
pub fn performance_score(inputs: &ScoreInputs, config: &ScoringConfig) -> i64 {
    let views = inputs.views as f64;
    let days = inputs.days_since_posted.max(1) as f64;

    let velocity = ((views / days) * 0.002).clamp(0.0, MAX_VELOCITY_SCORE);

    let retention = if inputs.duration_seconds <= 0 {
        0.0
    } else {
        let rate = (inputs.average_view_duration / inputs.duration_seconds as f64) * 100.0;
        (rate * 0.2).clamp(0.0, MAX_RETENTION_SCORE)
    };

    let engagement = if inputs.views <= 0 {
        0.0
    } else {
        let rate = ((inputs.likes + inputs.comments * 2) as f64 / views) * 100.0;
        (rate * 0.2).clamp(0.0, MAX_ENGAGEMENT_SCORE)
    };

    let audience = if config.subscriber_baseline <= 0 {
        0.0
    } else {
        ((views / config.subscriber_baseline as f64) * 20.0).clamp(0.0, MAX_AUDIENCE_SCORE)
    };

    let keyword_match = if inputs.title.contains(inputs.keyword) {
        KEYWORD_MATCH_SCORE
    } else {
        0.0
    };

    let time_bonus = upload_time_bonus(inputs.published_at, config.utc_offset) as f64;

    (velocity + retention + engagement + audience + keyword_match + time_bonus).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn utc(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    fn config() -> ScoringConfig {
        ScoringConfig {
            subscriber_baseline: 10000,
            utc_offset: FixedOffset::east_opt(0).unwrap(),
        }
    }

    fn inputs<'a>(title: &'a str, keyword: &'a str) -> ScoreInputs<'a> {
        ScoreInputs {
            views: 0,
            likes: 0,
            comments: 0,
            duration_seconds: 0,
            average_view_duration: 0.0,
            days_since_posted: 1,
            title,
            keyword,
            published_at: utc(3),
        }
    }

    #[test]
    fn watch_rate_buckets() {
        assert_eq!(estimated_watch_rate(0), 0.6);
        assert_eq!(estimated_watch_rate(180), 0.6);
        assert_eq!(estimated_watch_rate(181), 0.5);
        assert_eq!(estimated_watch_rate(600), 0.5);
        assert_eq!(estimated_watch_rate(601), 0.4);
        assert_eq!(estimated_watch_rate(1200), 0.4);
        assert_eq!(estimated_watch_rate(1201), 0.3);
        assert_eq!(estimated_watch_rate(7200), 0.3);
    }

    #[test]
    fn watch_rate_is_monotone_non_increasing() {
        let durations = [0, 60, 180, 181, 599, 600, 601, 1200, 1201, 86_400];
        let rates: Vec<f64> = durations.iter().map(|&d| estimated_watch_rate(d)).collect();
        assert!(rates.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn days_since_has_floor_of_one() {
        let published = utc(12);
        assert_eq!(days_since(published, published), 1);
        assert_eq!(days_since(published, published + Duration::seconds(1)), 1);
    }

    #[test]
    fn days_since_rounds_partial_days_up() {
        let published = utc(12);
        assert_eq!(days_since(published, published + Duration::days(2)), 2);
        assert_eq!(
            days_since(published, published + Duration::days(2) + Duration::seconds(1)),
            3
        );
    }

    #[test]
    fn days_since_handles_future_publish_dates() {
        let now = utc(12);
        assert_eq!(days_since(now + Duration::hours(12), now), 1);
        assert_eq!(days_since(now + Duration::days(3), now), 3);
    }

    #[test]
    fn time_bonus_covers_evening_window_inclusive() {
        let offset = FixedOffset::east_opt(0).unwrap();
        assert_eq!(upload_time_bonus(utc(17), offset), 0);
        assert_eq!(upload_time_bonus(utc(18), offset), 5);
        assert_eq!(upload_time_bonus(utc(21), offset), 5);
        assert_eq!(upload_time_bonus(utc(22), offset), 0);
    }

    #[test]
    fn time_bonus_follows_the_configured_offset() {
        let published = utc(10);
        let seoul = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(upload_time_bonus(published, seoul), 5); // 19:00 at +09:00
        assert_eq!(upload_time_bonus(published, FixedOffset::east_opt(0).unwrap()), 0);
    }

    #[test]
    fn score_matches_reference_scenario() {
        // velocity 30, retention 10, engagement 1.08, audience 20,
        // keyword 5, time bonus 5 -> round(71.08) = 71
        let score = performance_score(
            &ScoreInputs {
                views: 100_000,
                likes: 5_000,
                comments: 200,
                duration_seconds: 600,
                average_view_duration: 300.0,
                days_since_posted: 2,
                title: "cats compilation",
                keyword: "cats",
                published_at: utc(19),
            },
            &config(),
        );
        assert_eq!(score, 71);
    }

    #[test]
    fn zero_duration_scores_zero_retention() {
        let score = performance_score(
            &ScoreInputs {
                views: 1_000,
                ..inputs("rust stream", "cats")
            },
            &config(),
        );
        // velocity 2, retention 0, engagement 0, audience 2
        assert_eq!(score, 4);
    }

    #[test]
    fn zero_views_score_zero_engagement() {
        let score = performance_score(
            &ScoreInputs {
                duration_seconds: 600,
                average_view_duration: 300.0,
                ..inputs("rust stream", "cats")
            },
            &config(),
        );
        // only retention survives: (300/600*100)*0.2 = 10
        assert_eq!(score, 10);
    }

    #[test]
    fn zero_subscriber_baseline_scores_zero_audience() {
        let mut config = config();
        config.subscriber_baseline = 0;
        let score = performance_score(
            &ScoreInputs {
                views: 100_000,
                ..inputs("rust stream", "cats")
            },
            &config,
        );
        // velocity capped at 30, everything else zeroed out
        assert_eq!(score, 30);
    }

    #[test]
    fn score_is_bounded_for_extreme_inputs() {
        let maxed = performance_score(
            &ScoreInputs {
                views: 1_000_000_000,
                likes: 1_000_000_000,
                comments: 100_000_000,
                duration_seconds: 600,
                average_view_duration: 600.0,
                days_since_posted: 1,
                title: "cats forever",
                keyword: "cats",
                published_at: utc(19),
            },
            &config(),
        );
        assert_eq!(maxed, 100);

        let floor = performance_score(&inputs("rust stream", "cats"), &config());
        assert_eq!(floor, 0);
    }

    #[test]
    fn keyword_match_is_case_sensitive() {
        let with_match = performance_score(&inputs("all about Cats", "Cats"), &config());
        let without_match = performance_score(&inputs("all about cats", "Cats"), &config());
        assert_eq!(with_match - without_match, 5);
    }
}
