// ============================================================================
// File: src/orchestrator.rs
// Question-answering pipeline
// ============================================================================

use std::io::{self, BufRead};
use std::time::Duration;

use anyhow::Result;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::chat_client::ChatClient;
use crate::config::Config;
use crate::context::{self, Citation};
use crate::search_client::SearchClient;

pub struct AssistOrchestrator {
    search_client: SearchClient,
    chat_client: ChatClient,
    deployment_name: String,
    verbose: bool,
}

impl AssistOrchestrator {
    pub fn new(config: Config, verbose: bool) -> Self {
        let search_client = SearchClient::new(
            config.azure_search.endpoint,
            config.azure_search.index_name,
            config.azure_search.api_key,
        );
        let chat_client = ChatClient::new(
            config.azure_openai.endpoint,
            config.azure_openai.deployment_name.clone(),
            config.azure_openai.api_key,
        );

        Self {
            search_client,
            chat_client,
            deployment_name: config.azure_openai.deployment_name,
            verbose,
        }
    }

    /// One question, one answer: greet, read the question, retrieve, ask the
    /// model, print the answer with its citation list. Strictly sequential;
    /// any failure along the way propagates out and ends the process.
    pub async fn run(&self) -> Result<()> {
        println!(
            "{}",
            "Hi there! I'm Harper Assist, please ask a question!".bright_cyan()
        );
        let user_query = read_question()?;

        if self.verbose {
            println!("  {} Searching index for: {}", "→".yellow(), user_query.cyan());
        }

        let spinner = create_spinner("Searching your data...");
        let (documents, total_count) = self.search_client.search(&user_query).await?;
        spinner.finish_and_clear();

        if self.verbose {
            match total_count {
                Some(total) => println!(
                    "  {} {} result(s) returned of {} total hit(s)",
                    "→".yellow(),
                    documents.len(),
                    total
                ),
                None => println!("  {} {} result(s) returned", "→".yellow(), documents.len()),
            }
        }

        let assembled = context::assemble(&documents);

        if self.verbose {
            println!(
                "  {} Asking deployment: {}",
                "→".yellow(),
                self.deployment_name.cyan()
            );
        }

        let spinner = create_spinner("Thinking...");
        let answer = self
            .chat_client
            .complete(&user_query, &assembled.context_block)
            .await?;
        spinner.finish_and_clear();

        println!("{}", "Here is what I found based on your data:".green().bold());
        println!("{}", compose_final_output(&answer, &assembled.citations));

        Ok(())
    }
}

/// Read the single question line from standard input
fn read_question() -> Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(|c| c == '\r' || c == '\n').to_string())
}

/// Append the ordered citation list to the model's answer
pub fn compose_final_output(answer: &str, citations: &[Citation]) -> String {
    let mut output = format!("{}\n\nCitations:", answer);
    for citation in citations {
        output.push_str(&format!("\n{}", citation));
    }
    output
}

fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citation(index: usize, title: &str) -> Citation {
        Citation {
            index,
            title: title.to_string(),
        }
    }

    #[test]
    fn output_ends_with_citations_in_order() {
        let citations = vec![
            citation(1, "Geo Facts"),
            citation(2, "Unknown Source"),
        ];

        let output = compose_final_output("Paris, and the tower opened in 1889.", &citations);
        assert_eq!(
            output,
            "Paris, and the tower opened in 1889.\n\nCitations:\n[1] Geo Facts\n[2] Unknown Source"
        );
    }

    #[test]
    fn no_citations_still_prints_the_header() {
        let output = compose_final_output("I could not find anything.", &[]);
        assert_eq!(output, "I could not find anything.\n\nCitations:");
    }
}
