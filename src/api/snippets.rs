use serde::Deserialize;

use super::error::check_range;
use super::{ApiClient, ApiError, Query};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CodeTemplate {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub username: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub view_count: u32,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub usage_count: u32,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateQuery {
    pub language: Option<String>,
    pub skip: u32,
    pub limit: u32,
}

impl Default for TemplateQuery {
    fn default() -> Self {
        Self {
            language: None,
            skip: 0,
            limit: 20,
        }
    }
}

impl TemplateQuery {
    fn to_query(&self) -> Result<Query, ApiError> {
        let limit = check_range("limit", self.limit, 1, 100)?;
        let mut query = vec![("skip", self.skip.to_string()), ("limit", limit.to_string())];
        if let Some(language) = self.language.as_deref().filter(|l| !l.is_empty()) {
            query.push(("language", language.to_string()));
        }
        Ok(query)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageCount {
    pub language: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UsageRecorded {
    #[serde(default)]
    pub message: String,
    pub usage_count: u32,
}

pub const TEMPLATE_PAGE_SIZE: u32 = 100;

/// Local bump applied right after "use", before the backend answers. The next
/// fetch replaces it with the server's count.
pub fn record_template_use(templates: &mut [CodeTemplate], id: i64) -> bool {
    match templates.iter_mut().find(|t| t.id == id) {
        Some(template) => {
            template.usage_count = template.usage_count.saturating_add(1);
            true
        }
        None => false,
    }
}

impl ApiClient {
    pub async fn templates(&self, query: &TemplateQuery) -> Result<Vec<CodeTemplate>, ApiError> {
        self.get_json("/api/snippets/templates", query.to_query()?)
            .await
    }

    pub async fn popular_languages(&self, limit: u32) -> Result<Vec<LanguageCount>, ApiError> {
        let limit = check_range("limit", limit, 1, 50)?;
        self.get_json("/api/snippets/languages/popular", vec![("limit", limit.to_string())])
            .await
    }

    pub async fn use_template(&self, id: i64) -> Result<UsageRecorded, ApiError> {
        self.post_json(&format!("/api/snippets/{id}/use"), &serde_json::json!({}))
            .await
    }

    /// Walks the public listing page by page until `id` shows up or a short
    /// page marks the end.
    pub async fn find_template(&self, id: i64) -> Result<Option<CodeTemplate>, ApiError> {
        let mut query = TemplateQuery {
            limit: TEMPLATE_PAGE_SIZE,
            ..TemplateQuery::default()
        };

        loop {
            let page = self.templates(&query).await?;
            let exhausted = page.len() < query.limit as usize;
            if let Some(found) = page.into_iter().find(|t| t.id == id) {
                return Ok(Some(found));
            }
            if exhausted {
                return Ok(None);
            }
            query.skip = query.skip.saturating_add(query.limit);
        }
    }

    /// Bumps the local copy when it is present, then records the use. The
    /// request goes out whether or not `id` is in `templates`; on success the
    /// local count is replaced by the backend's.
    pub async fn record_use(
        &self,
        templates: &mut [CodeTemplate],
        id: i64,
    ) -> Result<UsageRecorded, ApiError> {
        if !record_template_use(templates, id) {
            tracing::debug!(id, "template not loaded locally, recording use without a local bump");
        }

        let recorded = self.use_template(id).await?;
        if let Some(template) = templates.iter_mut().find(|t| t.id == id) {
            template.usage_count = recorded.usage_count;
        }
        Ok(recorded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: i64, usage_count: u32) -> CodeTemplate {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "user_id": 1,
            "title": format!("template {id}"),
            "code": "fn main() {}",
            "language": "rust",
            "usage_count": usage_count,
        }))
        .unwrap()
    }

    #[test]
    fn test_record_template_use() {
        let mut templates = vec![template(1, 4), template(2, 0)];

        assert!(record_template_use(&mut templates, 2));
        assert_eq!(templates[1].usage_count, 1);
        assert_eq!(templates[0].usage_count, 4);

        assert!(!record_template_use(&mut templates, 99));
    }

    #[test]
    fn test_missing_usage_count_defaults_to_zero() {
        let parsed: CodeTemplate = serde_json::from_str(
            r#"{"id":5,"user_id":2,"title":"BFS","code":"...","language":"python"}"#,
        )
        .unwrap();
        assert_eq!(parsed.usage_count, 0);
        assert!(parsed.tags.is_none());
    }

    #[test]
    fn test_query_skips_empty_language() {
        let query = TemplateQuery {
            language: Some(String::new()),
            ..TemplateQuery::default()
        };
        let pairs = query.to_query().unwrap();
        assert!(pairs.iter().all(|(key, _)| *key != "language"));

        let bad = TemplateQuery { limit: 0, ..TemplateQuery::default() };
        assert!(matches!(bad.to_query(), Err(ApiError::InvalidArgument(_))));
    }
}
