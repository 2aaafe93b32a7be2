//! # rj-ui
//!
//! Askama templates plus the flat, pre-formatted rows they render.
//! Templates never see the repository; handlers build rows from core types.

use askama::Template;
use chrono::{DateTime, Utc};
use rj_core::jokes::JokeDetail;
use rj_core::models::{CommentEntry, FeedEntry, Joke};
use rj_core::time_ago;

/// One joke in the feed.
#[derive(Debug, Clone)]
pub struct FeedRow {
    pub id: String,
    pub username: String,
    /// Empty when the author has no avatar
    pub image: String,
    pub content: String,
    pub posted: String,
}

impl FeedRow {
    pub fn new(entry: &FeedEntry, now: DateTime<Utc>) -> Self {
        Self {
            id: entry.joke.id.to_string(),
            username: entry.username.clone(),
            image: entry.image.clone().unwrap_or_default(),
            content: entry.joke.content.clone(),
            posted: time_ago(entry.joke.updated_at, now),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommentRow {
    pub username: String,
    pub image: String,
    pub content: String,
    pub posted: String,
}

impl CommentRow {
    pub fn new(entry: &CommentEntry, now: DateTime<Utc>) -> Self {
        Self {
            username: entry.username.clone(),
            image: entry.image.clone().unwrap_or_default(),
            content: entry.comment.content.clone(),
            posted: time_ago(entry.comment.updated_at, now),
        }
    }
}

/// One line of the star breakdown, e.g. "5 ★ ██████ 67%".
#[derive(Debug, Clone, PartialEq)]
pub struct StarBar {
    pub stars: u8,
    pub count: u32,
    pub percent: u32,
}

/// Everything the joke page needs, already formatted.
#[derive(Debug, Clone)]
pub struct JokeView {
    pub id: String,
    pub content: String,
    pub posted: String,
    pub ratings_count: usize,
    pub average: String,
    /// Five stars first
    pub bars: Vec<StarBar>,
    pub comments: Vec<CommentRow>,
}

impl JokeView {
    pub fn new(detail: &JokeDetail, now: DateTime<Utc>) -> Self {
        let stats = &detail.stats;
        let bars = (1..=5u8)
            .rev()
            .map(|stars| {
                let i = usize::from(stars - 1);
                StarBar {
                    stars,
                    count: stats.histogram[i],
                    percent: stats.percentages[i],
                }
            })
            .collect();

        Self {
            id: detail.joke.id.to_string(),
            content: detail.joke.content.clone(),
            posted: time_ago(detail.joke.created_at, now),
            ratings_count: stats.count,
            average: stats.average_display(),
            bars,
            comments: detail.comments.iter().map(|c| CommentRow::new(c, now)).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "jokes/index.html")]
pub struct FeedTemplate<'a> {
    pub title: &'a str,
    pub jokes: &'a [FeedRow],
}

#[derive(Template)]
#[template(path = "jokes/posting.html")]
pub struct PostingTemplate<'a> {
    pub title: &'a str,
}

#[derive(Template)]
#[template(path = "jokes/edit.html")]
pub struct EditTemplate<'a> {
    pub title: &'a str,
    pub joke: &'a Joke,
}

#[derive(Template)]
#[template(path = "jokes/comments_ratings.html")]
pub struct JokeTemplate<'a> {
    pub title: &'a str,
    pub view: &'a JokeView,
}
