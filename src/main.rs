//! HealthAI Pro+: service entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Resolve effective log level (CLI `-v` flags > env > config)
//!   4. Init logger once
//!   5. Build the tokio runtime with `server.workers` threads
//!   6. Assemble knowledge base, cache, generator and pipeline
//!   7. Spawn Ctrl-C → shutdown signal watcher
//!   8. Start background components and the comms channel
//!   9. Cancel token + join everything

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use healthai::config::{self, Config};
use healthai::error::AppError;
use healthai::knowledge::KnowledgeBase;
use healthai::logger;
use healthai::pipeline::Pipeline;
use healthai::subsystems::cache::{CacheSweeper, Clock, ResponseCache, SystemClock};
use healthai::subsystems::comms;
use healthai::subsystems::llm::GeneratorAdapter;
use healthai::subsystems::runtime::{Component, spawn_components};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    // Load .env if present: ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.server.log_level.as_str());
    let force_cli_level = args.log_level.is_some();

    logger::init(effective_log_level, force_cli_level)?;

    info!(
        name = %config.server.name,
        configured_log_level = %config.server.log_level,
        effective_log_level = %effective_log_level,
        workers = config.server.workers,
        "config loaded"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers)
        .enable_all()
        .build()?;

    runtime.block_on(serve(config))
}

async fn serve(config: Config) -> Result<(), AppError> {
    let knowledge = Arc::new(KnowledgeBase::from_config(&config.knowledge)?);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cache = Arc::new(ResponseCache::new(config.cache.ttl, clock.clone()));

    let generator = GeneratorAdapter::from_config(&config.llm, config.gemini_api_key.clone())
        .map_err(|e| AppError::Config(e.to_string()))?;

    let pipeline = Arc::new(Pipeline::new(knowledge, cache.clone(), generator, clock));

    // Shared shutdown token: Ctrl-C cancels it, all tasks watch it.
    let shutdown = CancellationToken::new();

    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received — initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    let mut background: Vec<Box<dyn Component>> = Vec::new();
    if let Some(interval) = config.cache.sweep_interval {
        background.push(Box::new(CacheSweeper::new(cache, interval)));
    }
    let background = spawn_components(background, shutdown.clone());

    print_startup_summary(&config, &pipeline);

    let comms = comms::start(&config, pipeline, shutdown.clone());
    let served = comms.join().await;

    // If comms exited on its own (bind failure), still signal everything to stop.
    shutdown.cancel();
    background.join().await?;

    let _ = { use std::io::Write as _; std::io::stderr().flush() };

    served
}

fn print_startup_summary(config: &Config, pipeline: &Pipeline) {
    let fit = |text: String| -> String {
        const WIDTH: usize = 58;
        let char_count = text.chars().count();
        if char_count >= WIDTH {
            let mut out = text.chars().take(WIDTH - 1).collect::<String>();
            out.push('…');
            out
        } else {
            format!("{text:<WIDTH$}")
        }
    };

    let generator_line = match pipeline.generator().provider_name() {
        Some("gemini") => format!(
            "gemini model={} connect={}s read={}s",
            config.llm.gemini.model,
            config.llm.gemini.connect_timeout_seconds,
            config.llm.gemini.read_timeout_seconds
        ),
        Some(name) => name.to_string(),
        None => format!("disabled (configured: {})", config.llm.provider),
    };

    let sweep = match config.cache.sweep_interval {
        Some(d) => format!("every {}s", d.as_secs()),
        None => "off".to_string(),
    };

    #[cfg(feature = "channel-axum")]
    let http_line = format!("🌐 http: {}", config.server.bind);
    #[cfg(not(feature = "channel-axum"))]
    let http_line = "🌐 http: not compiled in".to_string();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ ⚕️  HealthAI Status                                           ║");
    println!("╟──────────────────────────────────────────────────────────────╢");
    println!("║ 🧾 Name: {:<51}║", config.server.name);
    println!("║ 🧠 PID: {:<52}║", std::process::id());
    println!("║ 🧵 Workers: {:<48}║", config.server.workers);
    println!("╟──────────────────────────────────────────────────────────────╢");
    println!("║ 📡 Comms                                                     ║");
    println!("║   {}║", fit(http_line));
    println!("║   {}║", fit(format!("📄 index: {}", config.server.index_file.display())));
    println!("╟──────────────────────────────────────────────────────────────╢");
    println!("║ 📚 Knowledge & cache                                         ║");
    println!("║   {}║", fit(format!("entries: {}", pipeline.knowledge().len())));
    println!("║   {}║", fit(format!("ttl: {}s, sweep: {}", config.cache.ttl.as_secs(), sweep)));
    println!("╟──────────────────────────────────────────────────────────────╢");
    println!("║ 🧠 Generator                                                 ║");
    println!("║   {}║", fit(generator_line));
    println!("╚══════════════════════════════════════════════════════════════╝");
}

struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: healthai [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                println!();
                println!("Environment:");
                println!("  GEMINI_API_KEY             Generator credential (never read from config files)");
                println!("  HEALTHAI_BIND              Override [server] bind");
                println!("  HEALTHAI_LOG_LEVEL         Override [server] log_level");
                std::process::exit(0);
            }
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => {}
        }
    }

    // Each -v raises verbosity one tier:
    //   -v      → warn
    //   -vv     → info
    //   -vvv    → debug  (which tier answered, cache writes)
    //   -vvvv+  → trace  (full generator payloads)
    let log_level = match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    };

    CliArgs { log_level, config_path }
}
