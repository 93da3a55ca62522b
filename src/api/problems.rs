use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: i64,
    pub title: String,
    pub difficulty: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sample_input: Option<String>,
    #[serde(default)]
    pub sample_output: Option<String>,
}

/// Case-insensitive difficulty match and title search, both optional.
pub fn filter_problems<'a>(
    problems: &'a [Problem],
    difficulty: Option<&str>,
    search: Option<&str>,
) -> Vec<&'a Problem> {
    let search = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty());

    problems
        .iter()
        .filter(|p| difficulty.map_or(true, |d| p.difficulty.eq_ignore_ascii_case(d)))
        .filter(|p| {
            search
                .as_deref()
                .map_or(true, |needle| p.title.to_lowercase().contains(needle))
        })
        .collect()
}

impl ApiClient {
    pub async fn problems(&self) -> Result<Vec<Problem>, ApiError> {
        self.get_json("/api/problems/", Vec::new()).await
    }

    pub async fn problem(&self, id: i64) -> Result<Problem, ApiError> {
        self.get_json(&format!("/api/problems/{id}"), Vec::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(id: i64, title: &str, difficulty: &str) -> Problem {
        Problem {
            id,
            title: title.to_string(),
            difficulty: difficulty.to_string(),
            description: String::new(),
            sample_input: None,
            sample_output: None,
        }
    }

    #[test]
    fn test_filter_problems() {
        let problems = vec![
            problem(1, "Two Sum", "easy"),
            problem(2, "Merge Intervals", "medium"),
            problem(3, "Sum of Subarrays", "Hard"),
        ];

        assert_eq!(filter_problems(&problems, None, None).len(), 3);
        assert_eq!(filter_problems(&problems, Some("hard"), None)[0].id, 3);

        let ids: Vec<i64> = filter_problems(&problems, None, Some(" sum "))
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);

        assert!(filter_problems(&problems, Some("easy"), Some("merge")).is_empty());
    }

    #[test]
    fn test_minimal_payload() {
        let parsed: Vec<Problem> =
            serde_json::from_str(r#"[{"id":4,"title":"Reverse List","difficulty":"easy"}]"#).unwrap();
        assert_eq!(parsed[0].title, "Reverse List");
        assert!(parsed[0].sample_input.is_none());
    }
}
