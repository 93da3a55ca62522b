use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::error::check_range;
use super::{ApiClient, ApiError, Query};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LatestThread {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForumCategory {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub thread_count: u32,
    #[serde(default)]
    pub latest_thread: Option<LatestThread>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadSort {
    Created,
    #[default]
    Updated,
    Replies,
    Views,
}

impl ThreadSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Replies => "replies",
            Self::Views => "views",
        }
    }
}

impl FromStr for ThreadSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "replies" => Ok(Self::Replies),
            "views" => Ok(Self::Views),
            other => Err(format!("unknown sort '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown order '{other}'")),
        }
    }
}

impl fmt::Display for ThreadSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadQuery {
    pub page: u32,
    pub limit: u32,
    pub sort: ThreadSort,
    pub order: SortOrder,
}

impl Default for ThreadQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            sort: ThreadSort::default(),
            order: SortOrder::default(),
        }
    }
}

impl ThreadQuery {
    fn to_query(self) -> Result<Query, ApiError> {
        if self.page == 0 {
            return Err(ApiError::InvalidArgument("page starts at 1".to_string()));
        }
        let limit = check_range("limit", self.limit, 1, 100)?;
        Ok(vec![
            ("page", self.page.to_string()),
            ("limit", limit.to_string()),
            ("sort", self.sort.as_str().to_string()),
            ("order", self.order.as_str().to_string()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForumThread {
    pub id: i64,
    pub category_id: i64,
    #[serde(default)]
    pub problem_id: Option<i64>,
    pub author_id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub view_count: u32,
    #[serde(default)]
    pub reply_count: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub author: Author,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub pages: u32,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryThreads {
    pub threads: Vec<ForumThread>,
    pub pagination: Pagination,
    pub category: CategorySummary,
}

impl ApiClient {
    pub async fn forum_categories(&self) -> Result<Vec<ForumCategory>, ApiError> {
        self.get_json("/api/forums/categories", Vec::new()).await
    }

    pub async fn category_threads(
        &self,
        category_id: i64,
        query: &ThreadQuery,
    ) -> Result<CategoryThreads, ApiError> {
        self.get_json(
            &format!("/api/forums/categories/{category_id}/threads"),
            query.to_query()?,
        )
        .await
    }
}
