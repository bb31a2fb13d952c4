//! Per-method options for [`super::VkClient`]
//!
//! Defaults mirror what the wrappers have always sent: extended answers,
//! likes included, the largest page size VK accepts for each method.

use crate::http::Params;
use crate::types::{ObjectRef, SortOrder};

/// Options for `groups.getById`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupLookup {
    pub extended: bool,
    pub fields: Vec<String>,
}

impl Default for GroupLookup {
    fn default() -> Self {
        Self {
            extended: true,
            fields: Vec::new(),
        }
    }
}

impl GroupLookup {
    #[must_use]
    pub fn fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

/// Options for `groups.getMembers`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembersQuery {
    pub fields: Vec<String>,
    pub offset: u32,
    pub count: u32,
}

impl Default for MembersQuery {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            offset: 0,
            count: 1000,
        }
    }
}

impl MembersQuery {
    #[must_use]
    pub fn fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn page(mut self, offset: u32, count: u32) -> Self {
        self.offset = offset;
        self.count = count;
        self
    }
}

/// Options for `board.getComments`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCommentsQuery {
    pub group_id: i64,
    pub topic_id: i64,
    pub start_comment_id: Option<i64>,
    pub offset: Option<u32>,
    pub need_likes: bool,
    /// At most 100
    pub count: u32,
    /// Also return author profiles
    pub extended: bool,
    pub sort: SortOrder,
}

impl TopicCommentsQuery {
    pub fn new(group_id: i64, topic_id: i64) -> Self {
        Self {
            group_id,
            topic_id,
            start_comment_id: None,
            offset: None,
            need_likes: true,
            count: 100,
            extended: true,
            sort: SortOrder::Desc,
        }
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .set("group_id", self.group_id)
            .set("topic_id", self.topic_id)
            .flag("need_likes", self.need_likes)
            .set_opt("start_comment_id", self.start_comment_id)
            .set_opt("offset", self.offset)
            .set("count", self.count)
            .flag("extended", self.extended)
            .set("sort", self.sort.as_str())
    }
}

/// `filter` values of `wall.get`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallFilter {
    All,
    Others,
    Owner,
}

impl WallFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            WallFilter::All => "all",
            WallFilter::Others => "others",
            WallFilter::Owner => "owner",
        }
    }
}

/// Options for `wall.get`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallQuery {
    /// Wall owner; communities are negative
    pub owner_id: Option<i64>,
    /// Short address instead of `owner_id`
    pub domain: Option<String>,
    pub offset: Option<u32>,
    pub count: u32,
    pub filter: Option<WallFilter>,
    pub extended: bool,
    pub fields: Vec<String>,
}

impl Default for WallQuery {
    fn default() -> Self {
        Self {
            owner_id: None,
            domain: None,
            offset: None,
            count: 100,
            filter: None,
            extended: true,
            fields: Vec::new(),
        }
    }
}

impl WallQuery {
    pub fn owner(owner_id: i64) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Self::default()
        }
    }

    pub fn domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: WallFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .set_opt("owner_id", self.owner_id)
            .set_opt("domain", self.domain.as_deref())
            .set_opt("offset", self.offset)
            .set("count", self.count)
            .set_opt("filter", self.filter.map(WallFilter::as_str))
            .flag("extended", self.extended)
            .list("fields", &self.fields)
    }
}

/// Options for `wall.getComments`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallCommentsQuery {
    pub owner_id: i64,
    pub post_id: i64,
    pub start_comment_id: Option<i64>,
    pub need_likes: bool,
    pub offset: Option<u32>,
    pub count: u32,
    pub sort: SortOrder,
    /// Truncate comment text to this many characters, 0 keeps it whole
    pub preview_length: u32,
    pub extended: bool,
    pub fields: Vec<String>,
    /// Return the thread under this comment
    pub comment_id: Option<i64>,
    pub thread_items_count: Option<u32>,
}

impl WallCommentsQuery {
    pub fn new(owner_id: i64, post_id: i64) -> Self {
        Self {
            owner_id,
            post_id,
            start_comment_id: None,
            need_likes: true,
            offset: None,
            count: 100,
            sort: SortOrder::Asc,
            preview_length: 0,
            extended: true,
            fields: Vec::new(),
            comment_id: None,
            thread_items_count: None,
        }
    }

    #[must_use]
    pub fn start_comment_id(mut self, id: i64) -> Self {
        self.start_comment_id = Some(id);
        self
    }

    #[must_use]
    pub fn thread(mut self, comment_id: i64, items: u32) -> Self {
        self.comment_id = Some(comment_id);
        self.thread_items_count = Some(items);
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .set("owner_id", self.owner_id)
            .set("post_id", self.post_id)
            .flag("need_likes", self.need_likes)
            .set_opt("start_comment_id", self.start_comment_id)
            .set_opt("offset", self.offset)
            .set("count", self.count)
            .set("sort", self.sort.as_str())
            .set("preview_length", self.preview_length)
            .flag("extended", self.extended)
            .list("fields", &self.fields)
            .set_opt("comment_id", self.comment_id)
            .set_opt("thread_items_count", self.thread_items_count)
    }
}

/// Object types accepted by `likes.getList`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeTarget {
    Post,
    Comment,
    Photo,
    Audio,
    Video,
    Note,
    Market,
    PhotoComment,
    VideoComment,
    TopicComment,
    MarketComment,
}

impl LikeTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            LikeTarget::Post => "post",
            LikeTarget::Comment => "comment",
            LikeTarget::Photo => "photo",
            LikeTarget::Audio => "audio",
            LikeTarget::Video => "video",
            LikeTarget::Note => "note",
            LikeTarget::Market => "market",
            LikeTarget::PhotoComment => "photo_comment",
            LikeTarget::VideoComment => "video_comment",
            LikeTarget::TopicComment => "topic_comment",
            LikeTarget::MarketComment => "market_comment",
        }
    }
}

/// `filter` values of `likes.getList`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikesFilter {
    /// Everyone who liked
    Likes,
    /// Everyone who reposted
    Copies,
}

impl LikesFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            LikesFilter::Likes => "likes",
            LikesFilter::Copies => "copies",
        }
    }
}

/// Options for `likes.getList`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikesQuery {
    pub target: LikeTarget,
    pub owner_id: i64,
    pub item_id: i64,
    pub filter: Option<LikesFilter>,
    /// Return liker profiles instead of bare ids
    pub extended: bool,
    pub offset: Option<u32>,
    pub count: u32,
}

impl LikesQuery {
    pub fn new(target: LikeTarget, owner_id: i64, item_id: i64) -> Self {
        Self {
            target,
            owner_id,
            item_id,
            filter: None,
            extended: true,
            offset: None,
            count: 1000,
        }
    }

    #[must_use]
    pub fn filter(mut self, filter: LikesFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .set("type", self.target.as_str())
            .set("owner_id", self.owner_id)
            .set("item_id", self.item_id)
            .set_opt("filter", self.filter.map(LikesFilter::as_str))
            .flag("friends_only", false)
            .flag("extended", self.extended)
            .set_opt("offset", self.offset)
            .set("count", self.count)
            .flag("skip_own", true)
    }
}

/// Comma-joined id list for `user_ids` / `group_ids`
pub(crate) fn join_refs(refs: &[ObjectRef]) -> String {
    refs.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
