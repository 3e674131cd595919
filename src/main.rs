mod auth;
mod chat;
mod common;
mod config;
mod network;
mod storage;
mod ui;

use anyhow::{Context, Result, bail};
use chat::{ChatSession, SubmitOutcome};
use clap::{Parser, Subcommand};
use config::AppConfig;
use dotenvy::dotenv;
use network::{AuthClient, NetworkWorker, WebhookClient};
use storage::{KeyValueStore, MemoryStore, SqliteStore};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "n8n_chat",
    version,
    about = "Chat client for an n8n webhook"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Keep the session id in memory only (nothing is written to disk)
    #[arg(long)]
    ephemeral: bool,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
enum Mode {
    /// Chat in the terminal; end a line with `\` to continue on the next one
    Repl,
    /// Send a single message and print the reply
    Send { text: String },
    /// Print the persisted chat session id, creating it if needed
    SessionId,
    /// Write the effective configuration to the config file
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    // Khởi tạo Logger để debug
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load(&cli.config);

    match cli.mode {
        None => run_desktop(app_config, cli.ephemeral).await,
        Some(Mode::Repl) => run_repl(&app_config, cli.ephemeral).await,
        Some(Mode::Send { text }) => send_once(&app_config, cli.ephemeral, text).await,
        Some(Mode::SessionId) => {
            let store = open_store(&app_config, cli.ephemeral)?;
            let mut session = ChatSession::new();
            println!("{}", session.bootstrap_session_id(store.as_ref())?);
            Ok(())
        }
        Some(Mode::InitConfig) => {
            config::save_config(&cli.config, &app_config)
                .with_context(|| format!("failed to write {}", cli.config))?;
            println!("Wrote {}", cli.config);
            Ok(())
        }
    }
}

fn open_store(config: &AppConfig, ephemeral: bool) -> Result<Box<dyn KeyValueStore>> {
    if ephemeral {
        return Ok(Box::new(MemoryStore::new()));
    }
    let store = SqliteStore::with_path(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    Ok(Box::new(store))
}

async fn run_desktop(config: AppConfig, ephemeral: bool) -> Result<()> {
    let store = open_store(&config, ephemeral)?;

    // 1. Tạo các kênh giao tiếp (Channels)
    // UI -> Network
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Network -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    // 2. Khởi chạy Network Thread (Chạy ngầm)
    let webhook = WebhookClient::new(config.webhook_url.clone());
    let auth = AuthClient::new(config.api_base_url.clone(), config.register_path.clone());
    tokio::spawn(NetworkWorker::new(event_tx, cmd_rx, webhook, auth).run());

    // 3. Khởi chạy UI (Chạy trên Main Thread)
    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);
    let mut store = Some(store);

    eframe::run_native(
        "Chat IA • n8n",
        options,
        Box::new(move |cc| {
            let (Some(event_receiver), Some(store)) = (event_rx.take(), store.take()) else {
                return Err("ChatApp should only be initialized once".into());
            };

            log::info!("Desktop client started (webhook: {})", config.webhook_url);

            Ok(Box::new(ChatApp::new(cc, store, cmd_tx.clone(), event_receiver)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("UI terminated: {err}"))
}

async fn run_repl(config: &AppConfig, ephemeral: bool) -> Result<()> {
    let store = open_store(config, ephemeral)?;
    let webhook = WebhookClient::new(config.webhook_url.clone());
    let mut session = ChatSession::new();
    let session_id = session.bootstrap_session_id(store.as_ref())?.to_string();

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(format!("Chat IA (session {session_id}). Ctrl+D para sair.\n").as_bytes())
        .await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input = String::new();
    while let Some(line) = lines.next_line().await? {
        if let Some(partial) = line.strip_suffix('\\') {
            input.push_str(partial);
            input.push('\n');
            continue;
        }
        input.push_str(&line);

        if session.submit(&mut input, &webhook).await == SubmitOutcome::Rejected {
            input.clear();
            continue;
        }
        if let Some(reply) = session.transcript().last() {
            stdout
                .write_all(format!("[{}] IA: {}\n", reply.created_at, reply.content).as_bytes())
                .await?;
        }
    }
    Ok(())
}

async fn send_once(config: &AppConfig, ephemeral: bool, text: String) -> Result<()> {
    let store = open_store(config, ephemeral)?;
    let webhook = WebhookClient::new(config.webhook_url.clone());
    let mut session = ChatSession::new();
    session.bootstrap_session_id(store.as_ref())?;

    let mut input = text;
    match session.submit(&mut input, &webhook).await {
        SubmitOutcome::Rejected => bail!("nothing to send"),
        SubmitOutcome::Failed(cause) => bail!("webhook call failed: {cause}"),
        SubmitOutcome::Replied => {
            if let Some(reply) = session.transcript().last() {
                println!("{}", reply.content);
            }
            Ok(())
        }
    }
}
