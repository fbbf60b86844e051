use chrono::{DateTime, Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    static ref DURATION_HOURS: Regex = Regex::new(r"(\d+)H").expect("invalid duration hours pattern");
    static ref DURATION_MINUTES: Regex = Regex::new(r"(\d+)M").expect("invalid duration minutes pattern");
}

/// 电影记录
///
/// 只有 `id`、`title`、`rating`、`poster_url` 是必填字段，
/// 其余字段后端可能不返回，展示时必须容忍缺失。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub poster_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worst_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<GenreLabel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_actors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// 类型标签，后端既可能返回 `{"title": "Action"}` 也可能直接返回字符串
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum GenreLabel {
    Titled { title: String },
    Plain(String),
}

impl GenreLabel {
    pub fn title(&self) -> &str {
        match self {
            GenreLabel::Titled { title } => title,
            GenreLabel::Plain(title) => title,
        }
    }
}

impl Movie {
    /// 获取类型标签列表（保持后端顺序）
    pub fn genre_titles(&self) -> Vec<&str> {
        self.genres
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(GenreLabel::title)
            .collect()
    }

    /// 获取上映年份
    pub fn release_year(&self) -> Option<i32> {
        self.date_published.as_deref().and_then(release_year)
    }

    /// 获取评分展示字符串
    ///
    /// 有数值评分时显示 `8.5 / 10`（满分缺省为 10），否则回退到 `rating` 原文
    pub fn rating_label(&self) -> String {
        match self.rating_value {
            Some(value) if value != 0.0 => {
                let best = self.best_rating.filter(|b| *b != 0.0).unwrap_or(10.0);
                format!("{} / {}", value, best)
            }
            _ => self.rating.clone(),
        }
    }

    /// 获取时长展示字符串，无法解析时返回原文
    pub fn duration_label(&self) -> Option<String> {
        let raw = self.duration.as_deref()?;
        Some(format_duration(raw).unwrap_or_else(|| raw.to_string()))
    }
}

/// 将 ISO 8601 时长（如 `PT2H22M`）格式化为 `2h 22m`
///
/// 既没有小时也没有分钟时返回 `None`
pub fn format_duration(duration: &str) -> Option<String> {
    let hours = DURATION_HOURS.captures(duration).map(|c| c[1].to_string());
    let minutes = DURATION_MINUTES.captures(duration).map(|c| c[1].to_string());

    let mut parts = Vec::new();
    if let Some(h) = hours {
        parts.push(format!("{}h", h));
    }
    if let Some(m) = minutes {
        parts.push(format!("{}m", m));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// 从发布日期中提取年份，支持 `2020-01-01` 与 RFC 3339 两种格式
pub fn release_year(date: &str) -> Option<i32> {
    let date = date.trim();
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(day.year());
    }
    DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_movie() -> Movie {
        serde_json::from_str(
            r#"{
                "id": "1",
                "title": "Mock Movie 1",
                "rating": "PG-13",
                "posterUrl": "https://example.com/poster1.jpg",
                "bestRating": 10,
                "datePublished": "2020-01-01",
                "directors": ["Mock Director"],
                "duration": "PT2H22M",
                "genres": [{"title": "Action"}, {"title": "Adventure"}],
                "mainActors": ["Actor 1", "Actor 2"],
                "ratingValue": 8.5,
                "summary": "A mock movie plot",
                "worstRating": 0,
                "writers": ["Writer 1"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_full_movie_deserialization() {
        let movie = sample_movie();
        assert_eq!(movie.poster_url, "https://example.com/poster1.jpg");
        assert_eq!(movie.genre_titles(), vec!["Action", "Adventure"]);
        assert_eq!(movie.main_actors.as_ref().map(Vec::len), Some(2));
        assert_eq!(movie.release_year(), Some(2020));
        assert_eq!(movie.rating_label(), "8.5 / 10");
        assert_eq!(movie.duration_label().as_deref(), Some("2h 22m"));
    }

    #[test]
    fn test_minimal_movie_tolerates_missing_fields() {
        let movie: Movie =
            serde_json::from_str(r#"{"id": "7", "title": "Bare", "rating": "7.1", "posterUrl": ""}"#)
                .unwrap();
        assert!(movie.genre_titles().is_empty());
        assert_eq!(movie.release_year(), None);
        assert_eq!(movie.rating_label(), "7.1");
        assert_eq!(movie.duration_label(), None);
    }

    #[test]
    fn test_plain_string_genres() {
        let movie: Movie = serde_json::from_str(
            r#"{"id": "2", "title": "T", "rating": "", "posterUrl": "", "genres": ["Drama", {"title": "War"}]}"#,
        )
        .unwrap();
        assert_eq!(movie.genre_titles(), vec!["Drama", "War"]);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration("PT2H22M").as_deref(), Some("2h 22m"));
        assert_eq!(format_duration("PT45M").as_deref(), Some("45m"));
        assert_eq!(format_duration("PT3H").as_deref(), Some("3h"));
        assert_eq!(format_duration("120 min"), None);
    }

    #[test]
    fn test_unparseable_duration_falls_back_to_raw() {
        let mut movie = sample_movie();
        movie.duration = Some("120 min".to_string());
        assert_eq!(movie.duration_label().as_deref(), Some("120 min"));
    }

    #[test]
    fn test_release_year_formats() {
        assert_eq!(release_year("2021-02-15"), Some(2021));
        assert_eq!(release_year("1999-12-31T23:00:00Z"), Some(1999));
        assert_eq!(release_year("sometime"), None);
    }

    #[test]
    fn test_rating_label_default_best() {
        let mut movie = sample_movie();
        movie.best_rating = None;
        movie.rating_value = Some(7.8);
        assert_eq!(movie.rating_label(), "7.8 / 10");
    }
}
