use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use inkseal::api;
use inkseal::assets::{ConfigSource, InitOutcome};
use inkseal::models::{self, AppConfig};
use inkseal::server;
use inkseal::services::{
    intake, DocumentWriter, FileKind, PageRenderer, PdfPageRenderer, PdfStampWriter,
    SignatureIntake, SigningSession,
};
use sig_composite::Placement;

#[derive(Parser)]
#[command(name = "inkseal")]
#[command(about = "Sign PDF documents with a scanned signature")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Stamp a signature onto a document and write the result
    Sign(SignArgs),
    /// List the configured ink colors
    Colors,
    /// Write the embedded config.yaml to CONFIG_FILE (or ./config.yaml)
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

#[derive(Args)]
struct SignArgs {
    /// PDF to sign
    #[arg(short, long)]
    document: PathBuf,

    /// Signature image (PNG, JPEG, WebP, GIF or BMP)
    #[arg(short, long)]
    signature: PathBuf,

    /// Output PDF path
    #[arg(short, long)]
    output: PathBuf,

    /// 0-based page to stamp
    #[arg(short, long, default_value_t = 0)]
    page: usize,

    /// Left edge of the stamp in points from the page's left edge (default: centred)
    #[arg(long)]
    x: Option<f64>,

    /// Top edge of the stamp in points from the page's top edge (default: centred)
    #[arg(long)]
    y: Option<f64>,

    /// Stamp width in points
    #[arg(long)]
    width: Option<f64>,

    /// Clockwise rotation in degrees
    #[arg(long, default_value_t = 0.0)]
    rotation: f64,

    /// Ink color: palette name, color name or hex value
    #[arg(short, long)]
    color: Option<String>,

    /// Keep the signature's background
    #[arg(long)]
    no_mask: bool,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "InkSeal API",
        description = "Place a scanned signature on a PDF and export the signed document",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_upload_document,
        api::handle_pages,
        api::handle_preview,
        api::handle_upload_signature,
        api::handle_signature,
        api::handle_clear_signature,
        api::handle_set_color,
        api::handle_colors,
        api::handle_pointer_down,
        api::handle_pointer_move,
        api::handle_pointer_up,
        api::handle_page_click,
        api::handle_placement,
        api::handle_export,
    ),
    components(schemas(
        models::PageInfo,
        models::PagesResponse,
        models::PlacementView,
        models::GestureView,
        models::ControllerView,
        models::PointerRequest,
        models::PointerResponse,
        models::TargetKind,
        models::SignatureResponse,
        models::ColorRequest,
        models::ColorEntry,
    )),
    tags(
        (name = "Document", description = "Source document and page previews"),
        (name = "Signature", description = "Signature upload and ink color"),
        (name = "Placement", description = "Pointer gestures placing the signature"),
        (name = "Export", description = "Signed document download")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Sign(args)) => run_sign_command(args).await,
        Some(Commands::Colors) => {
            run_colors_command();
            Ok(())
        }
        Some(Commands::Init { force }) => run_init_command(force),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkseal=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Sign a document in one go (no server needed)
async fn run_sign_command(args: SignArgs) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = AppConfig::load(&ConfigSource::from_env());

    let document = std::fs::read(&args.document)?;
    intake::check_mime(FileKind::Document, None, &document)?;
    let signature_bytes = std::fs::read(&args.signature)?;
    let signature = SignatureIntake::new(config.pipeline())
        .remove_background(!args.no_mask)
        .accept(&signature_bytes, None)?;
    if !signature.is_masked() && !args.no_mask {
        eprintln!("Warning: background removal failed, using the image as is");
    }

    let pages = PdfPageRenderer::new(config.viewer.render_dpi)
        .render(&document)
        .await?;

    let mut session = SigningSession::new(Arc::new(config));
    session.load_document(document, pages)?;
    session.click_page(args.page)?;
    session.load_signature(signature)?;
    if let Some(color) = &args.color {
        session.set_color(color)?;
    }

    let surface = session.surfaces()[args.page];
    let (px_per_pt_x, px_per_pt_y) = (1.0 / surface.scale_x(), 1.0 / surface.scale_y());
    let centred = session
        .controller()
        .placement()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("signature could not be placed"))?;
    session.set_placement(Placement {
        page_index: args.page,
        x: args.x.map(|x| x * px_per_pt_x).unwrap_or(centred.x),
        y: args.y.map(|y| y * px_per_pt_y).unwrap_or(centred.y),
        size_width: args
            .width
            .map(|w| w * px_per_pt_x)
            .unwrap_or(centred.size_width),
        rotation: args.rotation,
    })?;

    let job = session.prepare_export()?;
    let signed = PdfStampWriter::new()
        .write(&job.source, &job.instruction)
        .await?;
    session.finish_export(&job);

    std::fs::write(&args.output, &signed)?;
    println!(
        "Signed {} (page {}, {} bytes)",
        args.output.display(),
        job.instruction.page_index,
        signed.len()
    );
    Ok(())
}

/// Print the configured palette
fn run_colors_command() {
    init_cli_tracing();
    let config = AppConfig::load(&ConfigSource::from_env());
    let default = config.default_color();
    for (name, rgb) in config.palette() {
        let marker = if rgb == default { " (default)" } else { "" };
        println!("  {rgb}  {name}{marker}");
    }
}

/// Write the embedded config to disk
fn run_init_command(force: bool) -> anyhow::Result<()> {
    match ConfigSource::from_env().init(force)? {
        InitOutcome::Written(path) => println!("Wrote {}", path.display()),
        InitOutcome::Skipped(path) => println!(
            "Skipped {} (already exists, use --force to overwrite)",
            path.display()
        ),
    }
    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    println!("InkSeal v{VERSION}");
    println!("Sign PDF documents with a scanned signature\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!("  RUST_LOG    = {}", rust_log.as_deref().unwrap_or("(not set)"));

    println!("\nConfig:  {}", ConfigSource::from_env().origin());

    println!("\nCommands:");
    println!("  inkseal serve    Start the HTTP server");
    println!("  inkseal sign     Stamp a signature onto a PDF");
    println!("  inkseal colors   List ink colors");
    println!("  inkseal init     Write the default config.yaml");
    println!("\nRun 'inkseal --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkseal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let state = server::create_app_state(&ConfigSource::from_env());

    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "InkSeal server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
