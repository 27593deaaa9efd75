use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_SECRET_NOTE: &str = "You are my favorite person.";
pub const DEFAULT_PHOTO_BACK: &str = "A little note...";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelationshipConfig {
    #[serde(deserialize_with = "lenient")]
    pub anniversary: String,
    #[serde(deserialize_with = "lenient_milestones")]
    pub milestones: Vec<u32>,
    #[serde(deserialize_with = "lenient_list")]
    pub songs: Vec<Song>,
    #[serde(deserialize_with = "lenient_list")]
    pub trips: Vec<Trip>,
    #[serde(deserialize_with = "lenient_list")]
    pub photos: Vec<Photo>,
    #[serde(deserialize_with = "lenient_list")]
    pub open_when: Vec<OpenWhenLetter>,
    #[serde(deserialize_with = "lenient_list")]
    pub quiz: Vec<QuizQuestion>,
    #[serde(deserialize_with = "lenient")]
    pub anniversary_letter: String,
    #[serde(deserialize_with = "lenient")]
    pub secret_note: String,
}

impl RelationshipConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Err(ConfigError::Empty);
        }
        serde_json::from_str(raw).map_err(ConfigError::Parse)
    }

    pub fn secret_note(&self) -> &str {
        if self.secret_note.trim().is_empty() {
            DEFAULT_SECRET_NOTE
        } else {
            &self.secret_note
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Song {
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient")]
    pub artist: String,
    #[serde(deserialize_with = "lenient")]
    pub audio_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Trip {
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(deserialize_with = "lenient")]
    pub notes: String,
}

/// A gallery photo. The data file may list a bare image path instead of an
/// object; that form only carries `src`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PhotoRepr")]
pub struct Photo {
    pub src: String,
    pub caption: String,
    pub name: String,
    pub back: String,
}

impl Photo {
    pub fn display_caption(&self, index: usize) -> String {
        if self.caption.trim().is_empty() {
            format!("Memory #{}", index + 1)
        } else {
            self.caption.clone()
        }
    }

    /// Credit line shown under the caption, if the photo names one.
    pub fn name_line(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }

    pub fn back_text(&self) -> &str {
        if self.back.trim().is_empty() {
            DEFAULT_PHOTO_BACK
        } else {
            &self.back
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PhotoRepr {
    Src(String),
    Full(PhotoFields),
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PhotoFields {
    #[serde(deserialize_with = "lenient")]
    src: String,
    #[serde(deserialize_with = "lenient")]
    caption: String,
    #[serde(deserialize_with = "lenient")]
    name: String,
    #[serde(deserialize_with = "lenient")]
    back: String,
}

impl From<PhotoRepr> for Photo {
    fn from(repr: PhotoRepr) -> Self {
        match repr {
            PhotoRepr::Src(src) => Photo {
                src,
                ..Photo::default()
            },
            PhotoRepr::Full(fields) => Photo {
                src: fields.src,
                caption: fields.caption,
                name: fields.name,
                back: fields.back,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenWhenLetter {
    #[serde(deserialize_with = "lenient")]
    pub label: String,
    #[serde(deserialize_with = "lenient")]
    pub color: String,
    #[serde(deserialize_with = "lenient")]
    pub left: ScreenOffset,
    #[serde(deserialize_with = "lenient")]
    pub top: ScreenOffset,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub kind: String,
    #[serde(deserialize_with = "lenient")]
    pub content: String,
}

/// Position of a floating letter. Strings pass through as CSS lengths,
/// bare numbers are pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScreenOffset {
    Css(String),
    Px(f64),
}

impl Default for ScreenOffset {
    fn default() -> Self {
        ScreenOffset::Px(0.0)
    }
}

impl ScreenOffset {
    pub fn to_css(&self) -> String {
        match self {
            ScreenOffset::Css(value) => value.clone(),
            ScreenOffset::Px(value) => format!("{value}px"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizQuestion {
    #[serde(deserialize_with = "lenient")]
    pub question: String,
    #[serde(deserialize_with = "lenient_list")]
    pub options: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub answer: Option<usize>,
    #[serde(deserialize_with = "lenient")]
    pub right_feedback: String,
    #[serde(deserialize_with = "lenient")]
    pub wrong_gif: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Empty,
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Empty => write!(f, "relationship data is empty"),
            ConfigError::Parse(err) => write!(f, "relationship data is malformed: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Empty => None,
            ConfigError::Parse(err) => Some(err),
        }
    }
}

/// Any value of the wrong shape (including `null`) becomes the default.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Keeps the entries that parse and drops the rest; a non-array is empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let year = match &value {
        serde_json::Value::Number(number) => number.as_i64().and_then(|y| i32::try_from(y).ok()),
        serde_json::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    Ok(year)
}

fn lenient_milestones<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    let mut milestones: Vec<u32> = items.iter().filter_map(milestone_from_value).collect();
    milestones.sort_unstable();
    milestones.dedup();
    Ok(milestones)
}

fn milestone_from_value(value: &serde_json::Value) -> Option<u32> {
    if let Some(days) = value.as_u64() {
        return u32::try_from(days).ok().filter(|days| *days > 0);
    }
    let days = value.as_f64()?;
    if days.fract() != 0.0 || days < 1.0 || days > u32::MAX as f64 {
        return None;
    }
    Some(days as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_collections_default_to_empty() {
        let config = RelationshipConfig::from_json(r#"{"anniversary":"2023-09-27"}"#)
            .expect("parse");
        assert_eq!(config.anniversary, "2023-09-27");
        assert!(config.quiz.is_empty());
        assert!(config.open_when.is_empty());
        assert!(config.photos.is_empty());
        assert_eq!(config.secret_note(), DEFAULT_SECRET_NOTE);
    }

    #[test]
    fn malformed_milestones_are_dropped() {
        let config =
            RelationshipConfig::from_json(r#"{"milestones":[365,-4,100,"x",12.5,100,1000.0,0]}"#)
                .expect("parse");
        assert_eq!(config.milestones, vec![100, 365, 1000]);
    }

    #[test]
    fn non_array_milestones_become_empty() {
        let config = RelationshipConfig::from_json(r#"{"milestones":"soon"}"#).expect("parse");
        assert!(config.milestones.is_empty());
    }

    #[test]
    fn photos_accept_bare_paths() {
        let config = RelationshipConfig::from_json(
            r#"{"photos":["/images/a.jpg",{"src":"/images/b.jpg","caption":"Beach","back":"sunburn"}]}"#,
        )
        .expect("parse");
        assert_eq!(config.photos[0].src, "/images/a.jpg");
        assert_eq!(config.photos[0].display_caption(0), "Memory #1");
        assert_eq!(config.photos[0].back_text(), DEFAULT_PHOTO_BACK);
        assert_eq!(config.photos[1].display_caption(1), "Beach");
        assert_eq!(config.photos[1].back_text(), "sunburn");
    }

    #[test]
    fn photo_name_line_skips_blank_names() {
        let config = RelationshipConfig::from_json(
            r#"{"photos":[{"src":"a.jpg","name":" Lake Tahoe "},{"src":"b.jpg","name":"  "},"c.jpg"]}"#,
        )
        .expect("parse");
        assert_eq!(config.photos[0].name_line(), Some("Lake Tahoe"));
        assert_eq!(config.photos[1].name_line(), None);
        assert_eq!(config.photos[2].name_line(), None);
    }

    #[test]
    fn open_when_offsets_accept_css_and_pixels() {
        let config = RelationshipConfig::from_json(
            r##"{"openWhen":[{"label":"Open when sad","color":"#f99","left":"12%","top":40,"type":"gif","content":"/g.gif"}]}"##,
        )
        .expect("parse");
        let letter = &config.open_when[0];
        assert_eq!(letter.left.to_css(), "12%");
        assert_eq!(letter.top.to_css(), "40px");
        assert_eq!(letter.kind, "gif");
    }

    #[test]
    fn null_and_mistyped_fields_fall_back_to_defaults() {
        let config = RelationshipConfig::from_json(
            r#"{"anniversary":"2023-09-27","quiz":null,"openWhen":null,"songs":{"a":1},
                "secretNote":null,"anniversaryLetter":42,"photos":[7,"/a.jpg",{"src":null,"caption":"Beach"}],
                "trips":[{"title":"CDO","year":"2023"},{"title":"Siargao","year":true},"oops"]}"#,
        )
        .expect("lenient parse");
        assert_eq!(config.anniversary, "2023-09-27");
        assert!(config.quiz.is_empty());
        assert!(config.open_when.is_empty());
        assert!(config.songs.is_empty());
        assert_eq!(config.secret_note(), DEFAULT_SECRET_NOTE);
        assert_eq!(config.anniversary_letter, "");
        assert_eq!(config.photos.len(), 2);
        assert_eq!(config.photos[1].src, "");
        assert_eq!(config.photos[1].caption, "Beach");
        assert_eq!(config.trips.len(), 2);
        assert_eq!(config.trips[0].year, Some(2023));
        assert_eq!(config.trips[1].year, None);
    }

    #[test]
    fn quiz_entries_survive_bad_fields() {
        let config = RelationshipConfig::from_json(
            r#"{"quiz":[{"question":"Where?","options":["a",2,"b"],"answer":"one","wrongGif":null}]}"#,
        )
        .expect("lenient parse");
        let question = &config.quiz[0];
        assert_eq!(question.options, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(question.answer, None);
        assert_eq!(question.wrong_gif, "");
    }

    #[test]
    fn empty_document_is_an_error() {
        assert!(matches!(
            RelationshipConfig::from_json("  "),
            Err(ConfigError::Empty)
        ));
        assert!(matches!(
            RelationshipConfig::from_json("{"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn parse_errors_describe_malformed_data() {
        let err = RelationshipConfig::from_json(r#"{"anniversary": }"#).expect_err("bad json");
        assert!(err.to_string().starts_with("relationship data is malformed"));
        let err = RelationshipConfig::from_json("42").expect_err("not an object");
        assert!(err.to_string().starts_with("relationship data is malformed"));
    }
}
