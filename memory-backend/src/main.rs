//! memory-bot - apply memory commands from the command line or stdin.
//!
//! `memory-bot "!save coffee oat latte #food"` handles one message; with no arguments every
//! stdin line is handled as its own message.

use dotenv::dotenv;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};

use memory_backend::bot::MemoryBot;
use memory_backend::commands::help;
use memory_backend::config::Config;
use memory_backend::storage::{DocumentStore, GithubContentStore};

fn usage() -> String {
    format!(
        "Usage: memory-bot [MESSAGE...]\n\n\
        Reads GITHUB_OWNER, GITHUB_REPO, GITHUB_TOKEN, GITHUB_BRANCH, MEMORY_FILE_PATH and\n\
        GITHUB_API_URL from the environment (or .env).\n\n{}",
        help::execute()
    )
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", usage());
        return ExitCode::SUCCESS;
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("[MemoryBot] {}", e);
            eprintln!("{}\n\n{}", e, usage());
            return ExitCode::from(2);
        }
    };

    let store = match GithubContentStore::new(&config) {
        Ok(s) => s,
        Err(e) => {
            log::error!("[MemoryBot] {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("[MemoryBot] Using memory document {}", store.describe());
    let bot = MemoryBot::new(store);

    if !args.is_empty() {
        return if run_message(&bot, &args.join(" ")).await {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let mut all_ok = true;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => all_ok &= run_message(&bot, &line).await,
            Ok(None) => break,
            Err(e) => {
                log::error!("[MemoryBot] Failed to read stdin: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    if all_ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Handle one message, printing the reply. Returns false when the message failed.
async fn run_message<S: DocumentStore>(bot: &MemoryBot<S>, text: &str) -> bool {
    match bot.handle(text).await {
        Ok(Some(reply)) => {
            println!("{}", reply);
            true
        }
        Ok(None) => true,
        Err(e) => {
            log::error!("[MemoryBot] Failed to handle message: {}", e);
            eprintln!("Error: {}", e);
            false
        }
    }
}
