//! Typed wrappers over VK API methods
//!
//! Each wrapper assembles the parameters for one method, attaches the
//! client's language and hands the call to the transport. Answers are
//! returned as VK sent them; singular lookups return the first element.

use super::types::{
    join_refs, GroupLookup, LikesQuery, MembersQuery, TopicCommentsQuery, WallCommentsQuery,
    WallQuery,
};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, Params, VkApi};
use crate::models::SearchBatch;
use crate::pagination::{fetch_search_batch, PacingConfig, SearchPaginator, SearchQuery};
use crate::types::{JsonValue, Lang, ObjectRef};
use tracing::{debug, warn};

/// VK API client
pub struct VkClient<A = HttpClient> {
    api: A,
    lang: Lang,
    pacing: PacingConfig,
}

impl VkClient<HttpClient> {
    /// Build an HTTP-backed client from configuration
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let lang = config.lang;
        let pacing = config.pacing.clone();
        let api = HttpClient::new(config)?;
        Ok(Self::new(api, lang).with_pacing(pacing))
    }
}

impl<A: VkApi> VkClient<A> {
    /// Wrap any transport
    pub fn new(api: A, lang: Lang) -> Self {
        Self {
            api,
            lang,
            pacing: PacingConfig::default(),
        }
    }

    /// Set the pacing used by [`iter_search`](Self::iter_search)
    #[must_use]
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Get the transport
    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    async fn call(&self, method: &str, params: Params) -> Result<JsonValue> {
        debug!(method, "forwarding call");
        self.api.call(method, params.set("lang", self.lang)).await
    }

    // ------------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------------

    /// `users.get` for one user
    pub async fn get_user_by_id<S: AsRef<str>>(
        &self,
        user: impl Into<ObjectRef>,
        fields: &[S],
    ) -> Result<JsonValue> {
        let user: ObjectRef = user.into();
        let params = Params::new().set("user_ids", &user).list("fields", fields);
        let users = self.call("users.get", params).await?;
        first_of(users, "user", &user)
    }

    /// `users.get` for several users
    pub async fn get_users_by_id<S: AsRef<str>>(
        &self,
        users: &[ObjectRef],
        fields: &[S],
    ) -> Result<JsonValue> {
        let params = Params::new()
            .set("user_ids", join_refs(users))
            .list("fields", fields);
        self.call("users.get", params).await
    }

    /// `users.getSubscriptions`
    pub async fn get_user_subs(&self, user_id: i64) -> Result<JsonValue> {
        self.call(
            "users.getSubscriptions",
            Params::new().set("user_id", user_id),
        )
        .await
    }

    // ------------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------------

    /// `groups.getById` for one community
    pub async fn get_group_by_id(
        &self,
        group: impl Into<ObjectRef>,
        lookup: &GroupLookup,
    ) -> Result<JsonValue> {
        let group: ObjectRef = group.into();
        let params = Params::new()
            .set("group_id", &group)
            .flag("extended", lookup.extended)
            .list("fields", &lookup.fields)
            .set("count", 1);
        let groups = self.call("groups.getById", params).await?;
        first_of(groups, "group", &group)
    }

    /// `groups.getById` for several communities; `count` defaults to the number of ids
    pub async fn get_groups_by_id(
        &self,
        groups: &[ObjectRef],
        lookup: &GroupLookup,
        count: Option<u32>,
    ) -> Result<JsonValue> {
        let count = count.unwrap_or(groups.len() as u32);
        let params = Params::new()
            .set("group_ids", join_refs(groups))
            .flag("extended", lookup.extended)
            .list("fields", &lookup.fields)
            .set("count", count);
        self.call("groups.getById", params).await
    }

    /// `groups.getMembers`
    pub async fn get_group_members(
        &self,
        group: impl Into<ObjectRef>,
        query: &MembersQuery,
    ) -> Result<JsonValue> {
        let group: ObjectRef = group.into();
        let params = Params::new()
            .set("group_id", group)
            .set("offset", query.offset)
            .set("count", query.count)
            .list("fields", &query.fields);
        self.call("groups.getMembers", params).await
    }

    // ------------------------------------------------------------------------
    // Boards
    // ------------------------------------------------------------------------

    /// `board.getTopics`
    pub async fn get_group_topics(&self, group_id: i64) -> Result<JsonValue> {
        self.call("board.getTopics", Params::new().set("group_id", group_id))
            .await
    }

    /// `board.getComments`
    pub async fn get_group_topic_comments(&self, query: &TopicCommentsQuery) -> Result<JsonValue> {
        self.call("board.getComments", query.to_params()).await
    }

    // ------------------------------------------------------------------------
    // Walls and likes
    // ------------------------------------------------------------------------

    /// `wall.get`
    pub async fn get_posts(&self, query: &WallQuery) -> Result<JsonValue> {
        self.call("wall.get", query.to_params()).await
    }

    /// `wall.getComments`
    pub async fn get_post_comments(&self, query: &WallCommentsQuery) -> Result<JsonValue> {
        self.call("wall.getComments", query.to_params()).await
    }

    /// `likes.getList`
    pub async fn get_obj_likes_ids(&self, query: &LikesQuery) -> Result<JsonValue> {
        self.call("likes.getList", query.to_params()).await
    }

    // ------------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------------

    /// One page of `newsfeed.search`, empty when VK found nothing
    pub async fn newsfeed_search(&self, query: &SearchQuery) -> Result<SearchBatch> {
        fetch_search_batch(&self.api, query, query.start_from.as_deref(), self.lang).await
    }

    /// Every page of `newsfeed.search`, following continuation tokens
    pub fn iter_search(&self, query: SearchQuery) -> SearchPaginator<&A> {
        SearchPaginator::new(&self.api, query, self.lang).with_pacing(self.pacing.clone())
    }

    // ------------------------------------------------------------------------
    // Links
    // ------------------------------------------------------------------------

    /// Web link to a community post, or an empty string if the owner cannot be resolved
    pub async fn post_link(&self, owner: impl Into<ObjectRef>, post_id: i64) -> String {
        let owner = Into::<ObjectRef>::into(owner).unsigned();

        let group = match self.get_group_by_id(owner.clone(), &GroupLookup::default()).await {
            Ok(group) => group,
            Err(e) => {
                warn!(owner = %owner, error = %e, "could not resolve post owner");
                return String::new();
            }
        };

        let screen_name = group.get("screen_name").and_then(JsonValue::as_str);
        let group_id = group.get("id").and_then(JsonValue::as_i64);
        match (screen_name, group_id) {
            (Some(screen_name), Some(group_id)) => {
                format!("https://vk.com/{screen_name}?w=wall-{group_id}_{post_id}")
            }
            _ => {
                warn!(owner = %owner, "community record lacks screen_name or id");
                String::new()
            }
        }
    }
}

impl<A> std::fmt::Debug for VkClient<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VkClient")
            .field("lang", &self.lang)
            .field("pacing", &self.pacing)
            .finish_non_exhaustive()
    }
}

/// First element of a list answer, or `NotFound` when the list is empty
///
/// Newer API versions wrap `groups.getById` results as `{"groups": [...]}`.
fn first_of(value: JsonValue, kind: &str, id: &ObjectRef) -> Result<JsonValue> {
    let list = match value {
        JsonValue::Object(mut object) => object.remove("groups").unwrap_or(JsonValue::Null),
        other => other,
    };

    match list {
        JsonValue::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(kind, id)),
        other => Err(Error::Other(format!(
            "expected a list of {kind}s, got {other}"
        ))),
    }
}
