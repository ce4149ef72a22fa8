use chat_client::{create_client, AVAILABLE_BACKENDS};
use chat_core::{BackendKind, Message, Sender, TickerContext, WidgetConfig};
use clap::{Parser, Subcommand};
use colored::Colorize;
use session_manager::{SessionManager, SkipReason, TurnOutcome, WidgetView};
use std::io::{self, Write};
use std::time::Instant;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "widget-cli")]
#[command(about = "Terminal front end for the stock chat widget")]
#[command(version)]
struct Cli {
    /// Backend adapter: external or local
    #[arg(long)]
    backend: Option<String>,

    /// Override the backend base URL
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long)]
    user_id: Option<String>,

    /// Ticker symbol to discuss
    #[arg(long)]
    ticker: Option<String>,

    /// Company name for --ticker
    #[arg(long, default_value = "")]
    name: String,

    /// Current price for --ticker
    #[arg(long, default_value_t = 0.0)]
    price: f64,

    /// Enable debug mode
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive chat
    Chat,
    /// Send a single message
    Send {
        /// Message content
        message: String,
    },
    /// Check that the backend is reachable
    Health,
}

/// One line of interactive input.
#[derive(Debug, PartialEq)]
enum Input {
    Message(String),
    Clear,
    Close,
    Open,
    Suggest(usize),
    Quit,
    Unknown(String),
    Empty,
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
        return Input::Quit;
    }
    let Some(command) = line.strip_prefix('/') else {
        return Input::Message(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("clear"), None) => Input::Clear,
        (Some("close"), None) => Input::Close,
        (Some("open"), None) => Input::Open,
        (Some("quit"), None) => Input::Quit,
        (Some("suggest"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Input::Suggest(n),
            _ => Input::Unknown(line.to_string()),
        },
        _ => Input::Unknown(line.to_string()),
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_line_number(true)
                .with_file(false),
        )
        .init();
}

fn build_config(cli: &Cli) -> anyhow::Result<WidgetConfig> {
    let mut config = WidgetConfig::new();
    if let Some(backend) = &cli.backend {
        config.backend = BackendKind::parse(backend).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown backend: {}. Available backends: {}",
                backend,
                AVAILABLE_BACKENDS.join(", ")
            )
        })?;
    }
    if let Some(url) = &cli.base_url {
        config.api_base_url = Some(url.clone());
    }
    if let Some(user_id) = &cli.user_id {
        config.user_id = user_id.clone();
    }
    config.debug_api |= cli.debug;
    Ok(config)
}

fn ticker_context(cli: &Cli) -> Option<TickerContext> {
    cli.ticker.as_ref().map(|symbol| {
        let symbol = symbol.to_uppercase();
        let name = if cli.name.is_empty() {
            symbol.clone()
        } else {
            cli.name.clone()
        };
        TickerContext::new(symbol, name, cli.price)
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = build_config(&cli)?;
    if cli.debug {
        eprintln!(
            "{}",
            format!("[DEBUG] Backend: {:?} at {}", config.backend, config.base_url()).dimmed()
        );
    }

    let client = create_client(&config)?;
    let manager = SessionManager::new(client, &config);
    let ticker = ticker_context(&cli);

    match cli.command {
        Commands::Chat => run_interactive_chat(&manager, ticker).await,
        Commands::Send { message } => send_once(&manager, ticker, &message).await,
        Commands::Health => check_health(&manager).await,
    }
}

async fn check_health(manager: &SessionManager) -> anyhow::Result<()> {
    let start = Instant::now();
    match manager.health().await {
        Ok(()) => {
            println!(
                "{}",
                format!("✅ Backend healthy ({:?})", start.elapsed()).green()
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", format!("❌ Backend unavailable: {}", e).red());
            std::process::exit(1);
        }
    }
}

async fn send_once(
    manager: &SessionManager,
    ticker: Option<TickerContext>,
    message: &str,
) -> anyhow::Result<()> {
    manager.open(ticker).await;
    let seen = manager.history().await.len();
    let outcome = manager.send_turn(message).await;
    report_outcome(&outcome);
    print_messages(&manager.history().await[seen..]);
    print_suggestions(&manager.view().await);
    Ok(())
}

async fn run_interactive_chat(
    manager: &SessionManager,
    ticker: Option<TickerContext>,
) -> anyhow::Result<()> {
    manager.open(ticker.clone()).await;

    let view = manager.view().await;
    println!("{}", format!("🤖 {}", view.title).cyan().bold());
    if let Some(subtitle) = &view.subtitle {
        println!("{}", subtitle.dimmed());
    }
    println!(
        "{}",
        "Commands: /clear /close /open /suggest N /quit".dimmed()
    );
    println!();

    let mut seen = 0;
    loop {
        let history = manager.history().await;
        print_messages(&history[seen.min(history.len())..]);
        seen = history.len();

        let view = manager.view().await;
        print_suggestions(&view);

        print!("{} ", format!("{} >", view.placeholder).cyan().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        match parse_input(&line) {
            Input::Empty => continue,
            Input::Quit => {
                println!("{}", "👋 Goodbye!".cyan());
                break;
            }
            Input::Message(text) => report_outcome(&manager.send_turn(&text).await),
            Input::Suggest(n) => match view.suggestions.as_ref().and_then(|p| p.items.get(n - 1)) {
                Some(suggestion) => {
                    let suggestion = suggestion.clone();
                    println!("{}", format!("You: {}", suggestion).dimmed());
                    report_outcome(&manager.select_suggestion(&suggestion).await);
                }
                None => println!("{}", format!("No suggestion #{}", n).yellow()),
            },
            Input::Clear => {
                manager.clear_history().await;
                seen = 0;
            }
            Input::Close => {
                manager.close().await;
                println!("{}", "Widget closed. /open to start a new session.".dimmed());
            }
            Input::Open => manager.open(ticker.clone()).await,
            Input::Unknown(text) => println!("{}", format!("Unknown command: {}", text).yellow()),
        }
        println!();
    }

    Ok(())
}

fn report_outcome(outcome: &TurnOutcome) {
    match outcome {
        TurnOutcome::Skipped(SkipReason::Locked) => println!(
            "{}",
            "Chat unavailable - close and reopen to start new session".red()
        ),
        TurnOutcome::Skipped(SkipReason::Closed) => {
            println!("{}", "Widget is closed, use /open".yellow())
        }
        TurnOutcome::Skipped(reason) => {
            tracing::debug!(?reason, "Nothing sent");
        }
        TurnOutcome::Fallback { reason } => {
            eprintln!("{}", format!("[WARN] {}", reason).dimmed())
        }
        TurnOutcome::Replied { locked: true } => {
            println!("{}", "⚠️  Too many unrelated topics, chat is now locked.".red())
        }
        TurnOutcome::Replied { .. } | TurnOutcome::Discarded => {}
    }
}

fn print_messages(messages: &[Message]) {
    for message in messages {
        let stamp = format!("[{}]", message.time_label()).dimmed();
        match message.sender() {
            // User lines were typed at the prompt
            Sender::User => {}
            Sender::Bot => println!("{} {} {}", stamp, "Assistant:".green().bold(), message.text()),
        }
    }
}

fn print_suggestions(view: &WidgetView) {
    if let Some(panel) = &view.suggestions {
        println!("{}", panel.header.dimmed());
        for (i, item) in panel.items.iter().enumerate() {
            println!("  {} {}", format!("{}.", i + 1).yellow(), item);
        }
    }
}
