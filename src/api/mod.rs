//! VK API wrappers
//!
//! [`VkClient`] exposes one method per VK call this crate uses: users,
//! communities and their members, subscriptions, board topics and comments,
//! wall posts and comments, like lists, and newsfeed search. All of them
//! forward to a [`crate::http::VkApi`] transport.

mod client;
mod types;

pub use client::VkClient;
pub use types::{
    GroupLookup, LikeTarget, LikesFilter, LikesQuery, MembersQuery, TopicCommentsQuery,
    WallCommentsQuery, WallFilter, WallQuery,
};
