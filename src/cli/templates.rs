use anyhow::{Context, Result};

use structures_client::api::snippets::{CodeTemplate, TemplateQuery};
use structures_client::api::ApiClient;

use super::{load, render};

pub async fn templates_command(
    client: &ApiClient,
    language: Option<String>,
    limit: u32,
) -> Result<()> {
    let query = TemplateQuery {
        language,
        limit,
        ..TemplateQuery::default()
    };
    let api = client.clone();
    let Some(templates) = load("templates", async move { api.templates(&query).await }).await else {
        return Ok(());
    };

    if templates.is_empty() {
        println!("No templates found.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = templates
        .iter()
        .map(|t| {
            let star = if t.is_featured { "★ " } else { "" };
            vec![
                t.id.to_string(),
                format!("{star}{}", t.title),
                t.language.clone(),
                t.username.clone(),
                t.usage_count.to_string(),
            ]
        })
        .collect();
    print!("{}", render::table(&["ID", "Title", "Language", "Author", "Uses"], &rows));
    Ok(())
}

/// Prints the code, then records the use. The count shown is bumped locally
/// first and replaced by the backend's number when it answers.
pub async fn use_template_command(client: &ApiClient, id: i64) -> Result<()> {
    let api = client.clone();
    let mut found: Vec<CodeTemplate> = load("template", async move { api.find_template(id).await })
        .await
        .flatten()
        .into_iter()
        .collect();

    match found.first() {
        Some(template) => {
            println!("{}", template.code);
            eprintln!("{} used {} times", template.title, template.usage_count.saturating_add(1));
        }
        None => eprintln!("Template {id} is not in the public listing; recording the use anyway."),
    }

    let recorded = client
        .record_use(&mut found, id)
        .await
        .context("Failed to record template use")?;
    eprintln!("Backend count: {} uses", recorded.usage_count);
    Ok(())
}

pub async fn languages_command(client: &ApiClient, limit: u32) -> Result<()> {
    let api = client.clone();
    let Some(languages) = load("languages", async move { api.popular_languages(limit).await }).await
    else {
        return Ok(());
    };

    let rows: Vec<Vec<String>> = languages
        .iter()
        .map(|l| vec![l.language.clone(), l.count.to_string()])
        .collect();
    print!("{}", render::table(&["Language", "Templates"], &rows));
    Ok(())
}
