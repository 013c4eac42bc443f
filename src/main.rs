//! Specbump - refresh RPM packaging from upstream git snapshots
//!
//! Binary entry point for the command-line tool.

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use specbump::config::DEFAULT_VERSION_REGEXP;
use specbump::{Config, Options, Updater};

#[derive(Parser, Debug)]
#[command(name = "specbump")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Update a spec file and its changes from an upstream git snapshot tarball", long_about = None)]
struct Cli {
    /// Upstream archive URL (http, https, file or a local path)
    #[arg(long)]
    url: String,

    /// Local file name for the archive (default: last segment of the URL)
    #[arg(long)]
    filename: Option<String>,

    /// Package name (default: name of the package directory)
    #[arg(long)]
    package: Option<String>,

    /// Author email stamped into changes entries
    #[arg(long)]
    email: String,

    /// Pattern with one capture group extracting the version from the archive directory
    #[arg(long, default_value = DEFAULT_VERSION_REGEXP)]
    version_regexp: String,

    /// Revision history file, relative to the archive's top-level directory
    #[arg(long)]
    history_file: Option<String>,

    /// Directory holding the spec and changes files
    #[arg(long, default_value = ".")]
    package_dir: PathBuf,

    /// Accepted for source service compatibility, unused
    #[arg(long)]
    outdir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for Options {
    fn from(cli: Cli) -> Self {
        Self {
            url: cli.url,
            filename: cli.filename,
            package: cli.package,
            email: cli.email,
            version_regexp: Some(cli.version_regexp),
            history_file: cli.history_file,
            package_dir: Some(cli.package_dir),
            outdir: cli.outdir,
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::resolve(Options::from(cli))?;
    let outcome = Updater::new(&config).run()?;

    println!("{}", outcome);
    Ok(())
}
