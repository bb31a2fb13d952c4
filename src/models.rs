//! Records returned by `newsfeed.search`
//!
//! Only the fields this crate reads are typed; everything else VK sends is
//! ignored during decoding.

use crate::error::Result;
use crate::media::{classify, MediaBundle};
use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `{"count": n}` counter objects on posts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Counter {
    #[serde(default)]
    pub count: u64,
}

/// A wall post as found in search results
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    pub id: i64,
    /// Wall owner; negative for communities
    pub owner_id: i64,
    #[serde(default)]
    pub from_id: i64,
    #[serde(default)]
    pub date: Option<i64>,
    #[serde(default)]
    pub edited: Option<i64>,
    #[serde(default)]
    pub post_type: String,
    #[serde(default)]
    pub text: String,
    /// Raw attachment list; decoded on demand by [`Post::media`]
    #[serde(default)]
    pub attachments: Vec<JsonValue>,
    #[serde(default)]
    pub comments: Option<Counter>,
    #[serde(default)]
    pub likes: Option<Counter>,
    #[serde(default)]
    pub reposts: Option<Counter>,
    #[serde(default)]
    pub views: Option<Counter>,
}

impl Post {
    pub fn date_created(&self) -> Option<DateTime<Utc>> {
        self.date.and_then(timestamp)
    }

    pub fn date_edited(&self) -> Option<DateTime<Utc>> {
        self.edited.and_then(timestamp)
    }

    pub fn comments_count(&self) -> u64 {
        self.comments.unwrap_or_default().count
    }

    pub fn likes_count(&self) -> u64 {
        self.likes.unwrap_or_default().count
    }

    pub fn reposts_count(&self) -> u64 {
        self.reposts.unwrap_or_default().count
    }

    pub fn views_count(&self) -> u64 {
        self.views.unwrap_or_default().count
    }

    /// Media URLs found in the attachments
    pub fn media(&self) -> Result<MediaBundle> {
        classify(&self.attachments)
    }

    /// Flatten into the record printed by the command-line runner
    pub fn to_record(&self, link: impl Into<String>) -> Result<PostRecord> {
        let media = self.media()?;
        Ok(PostRecord {
            id: self.id,
            text: self.text.clone(),
            link: link.into(),
            peer_channel_id: self.owner_id,
            channel_id: self.owner_id,
            published_at: self.date_created(),
            updated_at: self.date_edited(),
            images: media.photos,
            videos: media.videos,
            views: self.views_count(),
            forwards: self.reposts_count(),
            replies: self.comments_count(),
            likes: self.likes_count(),
        })
    }
}

fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// Community record from the `groups` side list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Group {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub screen_name: Option<String>,
}

/// User record from the `profiles` side list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub screen_name: Option<String>,
}

/// One page of `newsfeed.search` results
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchBatch {
    #[serde(default)]
    pub items: Vec<Post>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    /// Continuation token for the next page
    #[serde(default)]
    pub next_from: Option<String>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl SearchBatch {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The continuation token, if VK sent a non-empty one
    pub fn continuation(&self) -> Option<&str> {
        self.next_from.as_deref().filter(|t| !t.is_empty())
    }

    /// Find the community behind a negative owner id
    pub fn group(&self, owner_id: i64) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == owner_id.abs())
    }

    /// Find the user behind a positive owner id
    pub fn profile(&self, owner_id: i64) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == owner_id)
    }

    /// Link to a post on a user's wall, built from the `profiles` side list
    pub fn profile_post_link(&self, owner_id: i64, post_id: i64) -> Option<String> {
        let screen_name = self.profile(owner_id)?.screen_name.as_deref()?;
        Some(format!(
            "https://vk.com/{screen_name}?w=wall{owner_id}_{post_id}"
        ))
    }
}

/// Normalized post record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRecord {
    pub id: i64,
    pub text: String,
    pub link: String,
    pub peer_channel_id: i64,
    pub channel_id: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub views: u64,
    pub forwards: u64,
    pub replies: u64,
    pub likes: u64,
}
