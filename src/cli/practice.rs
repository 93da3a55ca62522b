use anyhow::{Context, Result};

use structures_client::api::problems::filter_problems;
use structures_client::api::ApiClient;

use super::{load, render};

pub async fn problems_command(
    client: &ApiClient,
    difficulty: Option<String>,
    search: Option<String>,
) -> Result<()> {
    let api = client.clone();
    let Some(problems) = load("problems", async move { api.problems().await }).await else {
        return Ok(());
    };

    let shown = filter_problems(&problems, difficulty.as_deref(), search.as_deref());
    if shown.is_empty() {
        println!("No problems found.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = shown
        .iter()
        .map(|p| vec![p.id.to_string(), p.difficulty.clone(), p.title.clone()])
        .collect();
    print!("{}", render::table(&["ID", "Difficulty", "Title"], &rows));
    println!("\n{} of {} problems", shown.len(), problems.len());
    Ok(())
}

pub async fn problem_command(client: &ApiClient, id: i64) -> Result<()> {
    let api = client.clone();
    let Some(problem) = load("problem", async move { api.problem(id).await }).await else {
        return Ok(());
    };

    println!("#{} {} [{}]\n", problem.id, problem.title, problem.difficulty);
    println!("{}", problem.description);
    if let Some(input) = &problem.sample_input {
        println!("\nSample input:\n{input}");
    }
    if let Some(output) = &problem.sample_output {
        println!("\nSample output:\n{output}");
    }
    Ok(())
}

pub async fn hints_command(client: &ApiClient, problem_id: i64, reveal: bool) -> Result<()> {
    if reveal {
        let api = client.clone();
        let Some(available) =
            load("hints", async move { api.hints_available(problem_id).await }).await
        else {
            return Ok(());
        };

        match available.next_hint_order.filter(|_| !available.hints_exhausted) {
            Some(order) => {
                let revealed = client
                    .reveal_hint(problem_id, order)
                    .await
                    .context("Failed to reveal hint")?;
                println!(
                    "Hint {} revealed (-{} XP, {} XP left)",
                    revealed.hint.order, revealed.xp_penalty_applied, revealed.remaining_xp
                );
            }
            None => println!("All hints for this problem are already revealed."),
        }
    }

    let available_api = client.clone();
    let revealed_api = client.clone();
    let (available, hints) = tokio::join!(
        load("hints", async move { available_api.hints_available(problem_id).await }),
        load("revealed hints", async move { revealed_api.revealed_hints(problem_id).await }),
    );

    if let Some(available) = available {
        println!(
            "Hints: {} of {} revealed, {} remaining",
            available.revealed_hints,
            available.total_hints,
            available.remaining()
        );
    }

    for hint in hints.unwrap_or_default() {
        let source = if hint.generated_by_ai { " (AI)" } else { "" };
        println!("\n{}. [-{} XP]{source}\n{}", hint.order, hint.xp_penalty, hint.content);
    }
    Ok(())
}
