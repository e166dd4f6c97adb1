//! Line-oriented terminal front end for the memory manager.
//!
//! The core never sees the command tokens; they are intercepted here.

use crate::config::Config;
use anyhow::{bail, Result};
use memchat_memory::{prompts, MemoryError, MemoryManager};
use memchat_provider::{ChatCompletion, HeuristicEstimator, OpenAiClient, TokenEstimator};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

pub async fn run(config: Config) -> Result<()> {
    if config.openai.api_key.is_empty() {
        bail!("OPENAI_API_KEY is not set (env var, .env, or memchat.toml)");
    }

    let timeout = Duration::from_secs(config.openai.request_timeout_secs);
    let chat: Arc<dyn ChatCompletion> = Arc::new(
        OpenAiClient::new(
            &config.openai.chat_model,
            Some(&config.openai.api_key),
            config.openai.base_url.as_deref(),
        )
        .with_timeout(timeout),
    );
    let summarizer: Arc<dyn ChatCompletion> = Arc::new(
        OpenAiClient::new(
            &config.openai.summarizer_model,
            Some(&config.openai.api_key),
            config.openai.base_url.as_deref(),
        )
        .with_timeout(timeout),
    );
    let estimator: Option<Arc<dyn TokenEstimator>> = config
        .memory
        .enable_token_trigger
        .then(|| Arc::new(HeuristicEstimator::new()) as Arc<dyn TokenEstimator>);

    let mut manager = MemoryManager::new(
        config.memory.to_policy(),
        prompts::CHAT_SYSTEM_PROMPT,
        prompts::SUMMARIZER_SYSTEM_PROMPT,
        chat,
        summarizer,
        estimator,
    )?;

    info!(
        chat_model = %config.openai.chat_model,
        summarizer_model = %config.openai.summarizer_model,
        "chat session started"
    );
    println!("memchat - stateful chat with summarization memory");
    println!("Type /memory, /stats, or /exit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break; // stdin closed
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "/exit" | "exit" | "quit" => break,
            "/memory" => {
                let summary = manager.snapshot_summary();
                println!("----- MEMORY SUMMARY (current state) -----");
                println!(
                    "{}",
                    if summary.is_empty() {
                        "(empty)"
                    } else {
                        summary.as_str()
                    }
                );
                println!("------------------------------------------\n");
            }
            "/stats" => {
                println!("{}\n", manager.stats());
            }
            _ => match manager.submit_user(input).await {
                Ok((reply, fold)) => {
                    println!("assistant> {reply}\n");
                    if fold.triggered {
                        println!(
                            "[summarization triggered] reason={} details={}\n",
                            fold.reason.map(|r| r.as_str()).unwrap_or("-"),
                            fold.details.as_deref().unwrap_or("-"),
                        );
                    }
                }
                Err(err) => {
                    // A corrupt state cannot be recovered; everything else
                    // keeps the session alive.
                    if matches!(err, MemoryError::InvariantViolation(_)) {
                        return Err(err.into());
                    }
                    error!(error = %err, "chat turn failed");
                    println!("error: {err}\n");
                }
            },
        }
    }

    info!("chat session ended");
    Ok(())
}
