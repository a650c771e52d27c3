use clap::Parser;
use pawrec_api::RestApi;
use pawrec_engine::{
    Engine, EngineConfig, EntityKind, HttpIntroGenerator, IntroGenerator, MemoryRecordStore,
    MemoryViewHistory, SeedData, TemplateIntroGenerator,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Similarity-based recommendations for an animal rehoming platform
#[derive(Parser, Debug)]
#[command(name = "pawrec")]
#[command(about = "Recommends animals and volunteer groups from view history", long_about = None)]
struct Args {
    /// HTTP API port
    #[arg(long, default_value_t = 8090)]
    http_port: u16,

    /// Feature vector width
    #[arg(long, default_value_t = 512)]
    vector_width: usize,

    /// Seconds between incremental index updates
    #[arg(long, default_value_t = 600)]
    update_interval: u64,

    /// Introductions persisted per enrichment commit
    #[arg(long, default_value_t = 5)]
    batch_size: usize,

    /// Path to the seed records file
    #[arg(short, long, default_value = "./data/seed.json")]
    seed_file: PathBuf,

    /// OpenAI-compatible chat-completions endpoint for introduction
    /// generation; without it a deterministic template generator is used
    #[arg(long)]
    generation_url: Option<String>,

    /// Model name sent to the generation endpoint
    #[arg(long, default_value = "gpt-4o-mini")]
    generation_model: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting pawrec v{}", env!("CARGO_PKG_VERSION"));
    info!("Seed file: {:?}", args.seed_file);
    info!("HTTP API port: {}", args.http_port);

    let seed = SeedData::load(&args.seed_file)?;
    let store = Arc::new(MemoryRecordStore::from_seed(seed));
    info!(
        "Records loaded: {} animals, {} groups",
        store.animal_count(),
        store.group_count()
    );

    let history = Arc::new(MemoryViewHistory::new());

    let generator: Arc<dyn IntroGenerator> = match args.generation_url {
        Some(url) => {
            let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
            Arc::new(HttpIntroGenerator::new(
                url,
                api_key,
                args.generation_model.clone(),
            ))
        }
        None => Arc::new(TemplateIntroGenerator),
    };

    let config = EngineConfig {
        vector_width: args.vector_width,
        enrich_batch_size: args.batch_size,
    };
    let engine = Arc::new(
        Engine::bootstrap(
            store.clone(),
            history.clone(),
            generator,
            config,
        )
        .await?,
    );
    info!("Catalogs built, indexes ready");

    // Timer-driven incremental updates; the catalogs serialize overlapping
    // passes themselves.
    let engine_timer = engine.clone();
    let update_interval = args.update_interval;
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_secs(update_interval));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tick.tick().await;
            for kind in [EntityKind::Animal, EntityKind::Group] {
                match engine_timer.refresh(kind).await {
                    Ok(0) => {}
                    Ok(added) => info!(%kind, added, "scheduled update indexed new entities"),
                    Err(error) => warn!(%kind, %error, "scheduled update failed"),
                }
            }
        }
    });

    let engine_http = engine.clone();
    let history_http = history.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(engine_http, history_http, http_port).await {
                eprintln!("HTTP server error: {}", e);
            }
        })
    });

    info!("pawrec started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
