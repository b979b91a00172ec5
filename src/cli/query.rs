//! `search` and `ask` commands: query the index, one-shot or interactive.

use tracing::debug;

use crate::cli::output::Output;
use crate::llm::create_client;
use crate::rag::answer::Synthesizer;
use crate::rag::embeddings::create_embedding_provider;
use crate::rag::retriever::Retriever;
use crate::rag::store::open_pair;
use crate::types::{AppError, Result, RetrievalResult};
use crate::utils::config::Config;

/// Words that end an interactive session.
const QUIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

/// Characters of chunk content shown per search hit.
const PREVIEW_CHARS: usize = 200;

/// Open the stored chunk/index pair and wire up the embedding provider.
async fn load_retriever(config: &Config) -> Result<Retriever> {
    let (store, index) = open_pair(&config.storage, &config.embedding.model).await?;
    let embedder = create_embedding_provider(&config.embedding)?;
    let retriever = Retriever::new(store, index, embedder);
    debug!(sections = retriever.len(), "retriever ready");
    Ok(retriever)
}

/// Handle the `search` subcommand
pub async fn handle_search(
    config: &Config,
    query: Option<String>,
    top_k: Option<usize>,
    output: &Output,
) -> Result<()> {
    let retriever = load_retriever(config).await?;
    let k = top_k.unwrap_or(config.retrieval.top_k);

    if let Some(query) = query {
        let results = retriever.retrieve(&query, k).await?;
        print_results(&results, output);
        return Ok(());
    }

    output.banner("Handbook search");
    output.info(&format!(
        "{} sections indexed; type a query, or 'quit' to leave",
        retriever.len()
    ));
    output.newline();

    loop {
        let Some(line) = output.prompt("Search:") else {
            break;
        };
        if line.is_empty() {
            continue;
        }
        if is_quit(&line) {
            break;
        }

        match retriever.retrieve(&line, k).await {
            Ok(results) => print_results(&results, output),
            // A desynced store/index pair will corrupt every later query.
            Err(e @ AppError::Consistency(_)) => return Err(e),
            Err(e) => output.error(&format!("Search failed: {}", e)),
        }
    }

    Ok(())
}

/// Handle the `ask` subcommand
pub async fn handle_ask(
    config: &Config,
    question: Option<String>,
    top_k: Option<usize>,
    no_sources: bool,
    output: &Output,
) -> Result<()> {
    let retriever = load_retriever(config).await?;
    let synthesizer = Synthesizer::new(create_client(&config.llm)?);
    let k = top_k.unwrap_or(config.retrieval.top_k);

    if let Some(question) = question {
        return ask_once(&retriever, &synthesizer, &question, k, !no_sources, output).await;
    }

    output.banner("Handbook assistant");
    output.info(&format!(
        "Answers come from {} indexed sections via {}",
        retriever.len(),
        synthesizer.model_name()
    ));
    output.info("Type a question, 'sources' to toggle source display, or 'quit' to leave");
    output.newline();

    let mut show_sources = !no_sources;

    loop {
        let Some(line) = output.prompt("Question:") else {
            break;
        };
        if line.is_empty() {
            continue;
        }
        if is_quit(&line) {
            break;
        }
        if line.eq_ignore_ascii_case("sources") {
            show_sources = !show_sources;
            output.info(&format!(
                "Source display: {}",
                if show_sources { "on" } else { "off" }
            ));
            continue;
        }

        match ask_once(&retriever, &synthesizer, &line, k, show_sources, output).await {
            Ok(()) => {}
            Err(e @ AppError::Consistency(_)) => return Err(e),
            Err(e) => output.error(&e.to_string()),
        }
    }

    output.info("Goodbye!");
    Ok(())
}

/// Retrieve context for one question and print the synthesized answer.
async fn ask_once(
    retriever: &Retriever,
    synthesizer: &Synthesizer,
    question: &str,
    k: usize,
    show_sources: bool,
    output: &Output,
) -> Result<()> {
    output.info("Searching for relevant sections...");
    let results = retriever.retrieve(question, k).await?;

    if results.is_empty() {
        output.info("No relevant sections found.");
        return Ok(());
    }

    output.info(&format!("Found {} relevant sections", results.len()));
    if show_sources {
        for result in &results {
            output.list_item(&format!("{}. {}", result.rank, result.chunk.source_label()));
        }
    }

    output.info("Generating answer...");
    let answer = synthesizer.answer(question, &results).await?;

    output.rule();
    output.subheader("Answer");
    output.body(&answer);
    output.newline();
    output.rule();

    if show_sources {
        output.subheader("Sources");
        for result in &results {
            output.list_item(&format!("{}. {}", result.rank, result.chunk.source_url));
        }
        output.newline();
    }

    Ok(())
}

fn print_results(results: &[RetrievalResult], output: &Output) {
    if results.is_empty() {
        output.info("No matching sections.");
        output.newline();
        return;
    }

    output.header(&format!("Top {} sections", results.len()));
    output.newline();
    for result in results {
        output.search_hit(
            result.rank,
            &result.chunk.source_label(),
            result.similarity,
            &preview(&result.chunk.content),
            &result.chunk.source_url,
        );
    }
}

/// First [`PREVIEW_CHARS`] characters of the content, flattened to one line.
fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let mut flat: String = chars
        .by_ref()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    if chars.next().is_some() {
        flat.push_str("...");
    }
    flat
}

fn is_quit(line: &str) -> bool {
    QUIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w))
}
