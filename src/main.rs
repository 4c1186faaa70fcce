use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use lumabits::api;
use lumabits::cli::{self, HistogramArgs, QuantizeArgs};
use lumabits::models::AppConfig;
use lumabits::server;

#[derive(Parser)]
#[command(name = "lumabits")]
#[command(about = "Luminosity bit-depth quantizer and colour-banding visualiser")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Quantize a PNG file to a lower luminosity bit depth
    Quantize(QuantizeArgs),
    /// Print the luminosity histogram of a PNG file after quantization
    Histogram(HistogramArgs),
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lumabits API",
        description = "Luminosity bit-depth quantization and histograms",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_upload,
        api::handle_original,
        api::handle_quantized,
        api::handle_histogram,
        api::handle_render,
    ),
    components(schemas(
        api::UploadResponse,
        api::HistogramResponse,
        api::RenderResponse,
    )),
    tags(
        (name = "Images", description = "Upload originals and download quantized exports"),
        (name = "Histogram", description = "Luminosity histograms and previews")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Quantize(args)) => run_quantize_command(&args),
        Some(Commands::Histogram(args)) => run_histogram_command(&args),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumabits=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Quantize a file directly (no server needed)
fn run_quantize_command(args: &QuantizeArgs) -> anyhow::Result<()> {
    init_cli_tracing();
    let config = AppConfig::from_env();

    let report = cli::run_quantize(args, &config)?;
    println!(
        "Quantized {} to {} -> {} ({} bytes, {} levels occupied)",
        args.input.display(),
        report.bit_depth,
        report.output.display(),
        report.size_bytes,
        report.histogram.occupied_levels()
    );
    if let Some(path) = &args.histogram {
        println!("Histogram written to {}", path.display());
    }

    Ok(())
}

/// Print a histogram directly (no server needed)
fn run_histogram_command(args: &HistogramArgs) -> anyhow::Result<()> {
    init_cli_tracing();
    let config = AppConfig::from_env();

    let output = cli::run_histogram(args, &config)?;
    print!("{output}");
    if args.json {
        println!();
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    // Header
    println!("Lumabits v{VERSION}");
    println!("Luminosity bit-depth quantizer and colour-banding visualiser\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    // Effective configuration
    let config_source = match config_file {
        Some(ref path) if std::path::Path::new(path).exists() => path.to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    let config = AppConfig::load(config_file.as_deref().map(std::path::Path::new));
    println!("\nConfiguration ({config_source}):");
    println!("  max_upload_bytes  = {}", config.max_upload_bytes);
    println!("  max_dimension     = {}", config.max_dimension);
    println!("  default_bit_depth = {}", config.default_bit_depth);
    println!("  store_capacity    = {}", config.store_capacity);
    println!("  optimize_png      = {}", config.optimize_png);

    // Commands section
    println!("\nCommands:");
    println!("  lumabits serve       Start the HTTP server");
    println!("  lumabits quantize    Quantize a PNG file");
    println!("  lumabits histogram   Print a luminosity histogram");
    println!("\nRun 'lumabits --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumabits=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    let bind_addr = config.bind_addr.clone();

    tracing::info!(
        max_upload_bytes = config.max_upload_bytes,
        max_dimension = config.max_dimension,
        default_bit_depth = config.default_bit_depth,
        store_capacity = config.store_capacity,
        optimize_png = config.optimize_png,
        "Configuration loaded"
    );

    // Create application state using shared server module
    let state = server::create_app_state(config);

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Lumabits server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
