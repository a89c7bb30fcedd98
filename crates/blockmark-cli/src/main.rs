mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "blockmark",
    version,
    about = "Inspect extracted PDF text blocks and where their highlights land on the page"
)]
struct Cli {
    /// Extraction backend base URL (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// JSON config file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a PDF's extraction and list its blocks in reading order
    Extract {
        /// URL of the source PDF
        url: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Read a saved extraction response instead of calling the backend
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Click a block and print the overlay box it gets on its page
    Locate {
        url: String,

        /// Index in the ordered block list
        #[arg(short, long)]
        block: usize,

        /// Page rotation in degrees (multiple of 90)
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        rotation: i32,

        /// Rendered page size in pixels, e.g. 816x1056
        #[arg(long, value_name = "WxH")]
        page_size: Option<String>,

        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Select free text and show which block and highlight it resolves to
    Select {
        url: String,

        /// Selected text, as dragged over the extracted text
        #[arg(short, long)]
        text: String,

        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        rotation: i32,

        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Print the proxied URL the PDF view loads
    ProxyUrl { url: String },
    /// Download a PDF through the backend proxy
    Download {
        url: String,

        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: PathBuf,
    },
    /// Print the effective configuration as JSON
    Config,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "blockmark=debug,blockmark_core=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = commands::Context::load(cli.config.as_deref(), cli.base_url).and_then(|ctx| {
        match cli.command {
            Commands::Extract { url, output, input } => {
                commands::extract::run(&ctx, &url, input, &output)
            }
            Commands::Locate {
                url,
                block,
                rotation,
                page_size,
                input,
                output,
            } => commands::locate::run(
                &ctx,
                &url,
                block,
                rotation,
                page_size.as_deref(),
                input,
                &output,
            ),
            Commands::Select {
                url,
                text,
                rotation,
                input,
                output,
            } => commands::select::run(&ctx, &url, &text, rotation, input, &output),
            Commands::ProxyUrl { url } => commands::proxy::url(&ctx, &url),
            Commands::Download { url, out } => commands::proxy::download(&ctx, &url, &out),
            Commands::Config => output::json::print(&ctx.config),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
