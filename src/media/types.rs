//! Attachment payloads and the classified media bundle

use crate::types::{JsonObject, JsonValue};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// One size variant of a photo
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotoSize {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    /// Size letter (`s`, `m`, `x`, `y`, `z`, `w`, ...)
    #[serde(rename = "type", default)]
    pub size_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Photo {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub owner_id: i64,
    pub sizes: Vec<PhotoSize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Video {
    pub owner_id: i64,
    pub id: i64,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl Video {
    /// Canonical player URL, `https://vk.com/video?z=video{owner}_{id}[_{key}]`
    pub fn player_url(&self) -> String {
        match self.access_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => format!(
                "https://vk.com/video?z=video{}_{}_{key}",
                self.owner_id, self.id
            ),
            None => format!("https://vk.com/video?z=video{}_{}", self.owner_id, self.id),
        }
    }
}

/// An audio track; restricted tracks come without a URL
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Audio {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// A preview image size inside a document; VK names the URL `src` here
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PreviewSize {
    pub src: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PreviewPhoto {
    #[serde(default)]
    pub sizes: Vec<PreviewSize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DocPreview {
    #[serde(default)]
    pub photo: Option<PreviewPhoto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Doc {
    pub url: String,
    #[serde(default)]
    pub ext: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub preview: Option<DocPreview>,
}

impl Doc {
    /// Whether the file extension marks a JPEG image
    pub fn is_jpeg(&self) -> bool {
        self.ext.eq_ignore_ascii_case("jpg") || self.ext.eq_ignore_ascii_case("jpeg")
    }

    /// Preview image URLs, in the order VK lists them
    pub fn preview_urls(&self) -> impl Iterator<Item = &str> {
        self.preview
            .iter()
            .filter_map(|p| p.photo.as_ref())
            .flat_map(|photo| photo.sizes.iter().map(|s| s.src.as_str()))
    }
}

/// A media item or link attached to a post or comment
///
/// On the wire an attachment is `{"type": "<tag>", "<tag>": {payload}}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    Photo(Photo),
    Video(Video),
    Audio(Audio),
    Link(Link),
    /// Document; VK occasionally sends `"doc": null` or `"doc": {}`
    Doc(Option<Doc>),
    /// Any tag this crate does not classify (`poll`, `market`, `sticker`, ...)
    Unknown { kind: String, payload: JsonValue },
}

impl<'de> Deserialize<'de> for Attachment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut object = JsonObject::deserialize(deserializer)?;

        let kind = match object.remove("type") {
            Some(JsonValue::String(kind)) => kind,
            Some(other) => {
                return Err(de::Error::custom(format!(
                    "attachment type must be a string, got {other}"
                )))
            }
            None => return Err(de::Error::missing_field("type")),
        };

        Ok(match kind.as_str() {
            "photo" => Attachment::Photo(payload::<_, D::Error>(&mut object, "photo")?),
            "video" => Attachment::Video(payload::<_, D::Error>(&mut object, "video")?),
            "audio" => Attachment::Audio(payload::<_, D::Error>(&mut object, "audio")?),
            "link" => Attachment::Link(payload::<_, D::Error>(&mut object, "link")?),
            "doc" => match object.remove("doc") {
                None => return Err(de::Error::missing_field("doc")),
                Some(JsonValue::Null) => Attachment::Doc(None),
                Some(JsonValue::Object(doc)) if doc.is_empty() => Attachment::Doc(None),
                Some(doc) => Attachment::Doc(Some(decode::<_, D::Error>("doc", doc)?)),
            },
            _ => Attachment::Unknown {
                payload: object.remove(&kind).unwrap_or(JsonValue::Null),
                kind,
            },
        })
    }
}

/// Take the payload stored under `key` and decode it
fn payload<T, E>(object: &mut JsonObject, key: &'static str) -> Result<T, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    let value = object.remove(key).ok_or_else(|| E::missing_field(key))?;
    decode(key, value)
}

fn decode<T, E>(key: &str, value: JsonValue) -> Result<T, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    serde_json::from_value(value).map_err(|e| E::custom(format!("invalid {key} attachment: {e}")))
}

/// URLs collected from one attachment list, grouped by media type
///
/// Each list keeps the order the attachments came in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaBundle {
    pub videos: Vec<String>,
    pub photos: Vec<String>,
    pub audios: Vec<String>,
    pub links: Vec<String>,
    pub docs: Vec<String>,
    /// Tags that were seen but not classified
    pub unrecognized: Vec<String>,
}
