//! Media extraction module
//!
//! Sorts the attachments of a post into video, photo, audio, link and
//! document URL lists.

mod types;

pub use types::{
    Attachment, Audio, Doc, DocPreview, Link, MediaBundle, Photo, PhotoSize, PreviewPhoto,
    PreviewSize, Video,
};

use crate::error::Result;
use crate::types::JsonValue;
use serde::Deserialize;
use tracing::warn;

/// Decode the raw attachment list of a post or comment
///
/// A recognized tag whose payload lacks a required key fails the whole list
/// with [`crate::Error::JsonParse`].
pub fn decode_attachments(raw: &[JsonValue]) -> Result<Vec<Attachment>> {
    raw.iter()
        .map(|value| Attachment::deserialize(value).map_err(Into::into))
        .collect()
}

/// Decode a raw attachment list and classify it with [`extract_media`]
pub fn classify(raw: &[JsonValue]) -> Result<MediaBundle> {
    Ok(extract_media(&decode_attachments(raw)?))
}

/// Classify an attachment list into URL lists
///
/// - photo: every size variant URL
/// - video: the canonical player URL
/// - audio: the direct URL, skipped for restricted tracks
/// - link: the link URL
/// - doc: the document URL, plus the preview image URLs for JPEG documents
///
/// Unknown tags add nothing; they are logged and listed in
/// [`MediaBundle::unrecognized`].
pub fn extract_media(attachments: &[Attachment]) -> MediaBundle {
    let mut bundle = MediaBundle::default();

    for attachment in attachments {
        match attachment {
            Attachment::Photo(photo) => {
                bundle
                    .photos
                    .extend(photo.sizes.iter().map(|size| size.url.clone()));
            }
            Attachment::Video(video) => bundle.videos.push(video.player_url()),
            Attachment::Audio(audio) => {
                if let Some(url) = audio.url.as_ref().filter(|u| !u.is_empty()) {
                    bundle.audios.push(url.clone());
                }
            }
            Attachment::Link(link) => bundle.links.push(link.url.clone()),
            Attachment::Doc(Some(doc)) => {
                if doc.is_jpeg() {
                    bundle.photos.extend(doc.preview_urls().map(String::from));
                }
                bundle.docs.push(doc.url.clone());
            }
            Attachment::Doc(None) => {}
            Attachment::Unknown { kind, payload } => {
                warn!(kind = %kind, payload = %payload, "skipping unrecognized attachment");
                bundle.unrecognized.push(kind.clone());
            }
        }
    }

    bundle
}

#[cfg(test)]
mod tests;
