use clap::{Parser, Subcommand};
use folio::lqip::{AssetRef, ImageHandle, LqipGenerator, LqipOptions};
use folio::render::{Interaction, WorksList};
use folio::{config, content, output};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Works list rendering and image placeholders for a portfolio site")]
#[command(long_about = "\
Works list rendering and image placeholders for a portfolio site

Project layout:

  ./
  ├── config.toml          # Optional, see 'folio gen-config'
  └── src/
      └── assets/          # Relative asset paths resolve here
          └── works/
              └── atlas.png

Placeholders are tiny blurred copies of an image, inlined as base64 data
URLs. Any image that cannot be read or decoded gets a transparent 1x1 GIF
instead, so a broken asset never fails a build.

Logging is controlled with FOLIO_LOG (e.g. FOLIO_LOG=folio=debug) and
FOLIO_LOG_FORMAT=json.")]
#[command(version = version_string())]
struct Cli {
    /// Project root (holds config.toml and src/assets/)
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate placeholders for assets, in argument order
    Lqip {
        /// Asset paths relative to the assets directory
        #[arg(required = true)]
        assets: Vec<String>,
        /// Treat each argument as an image src (/@fs/..., /src/...) to resolve
        #[arg(long)]
        src: bool,
        /// Render grayscale placeholders
        #[arg(long)]
        grayscale: bool,
        /// Placeholder width in pixels (overrides config)
        #[arg(long)]
        width: Option<u32>,
        /// Print only the data URLs, one per line
        #[arg(long)]
        raw: bool,
    },
    /// Render the works list to an HTML page
    Render {
        /// JSON export of works
        #[arg(long)]
        works: PathBuf,
        /// Interaction to replay before rendering, e.g. enter:ID, click:ID,
        /// down:outside, move:details (repeatable, applied in order)
        #[arg(long = "event")]
        events: Vec<Interaction>,
        /// Render the mobile variant (no pin hint)
        #[arg(long)]
        mobile: bool,
        /// Page title
        #[arg(long, default_value = "Works")]
        title: String,
        /// Output HTML file
        #[arg(long, default_value = "dist/index.html")]
        output: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Lqip {
            assets,
            src,
            grayscale,
            width,
            raw,
        } => {
            let site_config = config::load_config(&cli.root)?;
            init_thread_pool(&site_config.processing);

            let mut options = LqipOptions::from(&site_config.lqip);
            if grayscale {
                options = options.grayscale(true);
            }
            if let Some(w) = width {
                options = options.width(w);
            }
            let generator = LqipGenerator::new(&cli.root)
                .with_assets_dir(&site_config.assets_dir)
                .with_options(options);

            let refs: Vec<AssetRef> = assets
                .iter()
                .map(|a| {
                    if src {
                        AssetRef::Handle(ImageHandle::from_src(a.as_str()))
                    } else {
                        AssetRef::Path(a.clone())
                    }
                })
                .collect();
            let urls = generator.placeholders(&refs);

            if raw {
                for url in &urls {
                    println!("{}", url);
                }
            } else {
                output::print_lqip_output(&assets, &urls);
                println!("Cache: {}", generator.stats());
            }
        }
        Command::Render {
            works,
            events,
            mobile,
            title,
            output: output_path,
        } => {
            let site_config = config::load_config(&cli.root)?;
            let works = content::load_works(&works)?;
            info!(count = works.len(), "loaded works");

            let mut list = WorksList::new(works)
                .mobile(mobile)
                .hints(site_config.works);
            for event in &events {
                if let Some(outcome) = list.apply(event)
                    && let Some(url) = outcome.open
                {
                    info!(%url, "navigation requested");
                }
            }

            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output_path, list.render_page(&title).into_string())?;
            output::print_works_output(&list);
            println!("==> Wrote {}", output_path.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Logs go to stderr so `lqip --raw` output stays clean.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| EnvFilter::new("folio=warn"));
    let format = env::var("FOLIO_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());
    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
