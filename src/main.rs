use clap::{Parser, Subcommand};
use pagesmith::{config, generate, output, scan, table};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pagesmith")]
#[command(about = "Regenerate the index, tag pages and sitemap of a static HTML site")]
#[command(long_about = "\
Regenerate the index, tag pages and sitemap of a static HTML site

Pages are plain HTML files under the content directory. Each may describe
itself in a metadata comment:

  <!-- META
  title: Comparing index funds
  description: Fees, tracking error and tax drag
  tags: investing, funds
  category: money
  date: 2024-05-01
  -->

Project layout (defaults):

  .
  ├── config.toml        # Optional, see 'pagesmith gen-config'
  ├── pages/             # Content root, scanned recursively for *.html
  │   └── crypto/btc.html
  ├── index.html         # Generated: all pages, newest first
  ├── tags/<tag>.html    # Generated: one page per tag
  └── sitemap.xml        # Generated

Fallbacks when metadata is missing:
  Title: filename without extension
  Date:  file modification day (YYYY-MM-DD)

Every run regenerates everything and overwrites previous output.")]
#[command(version)]
struct Cli {
    /// Project root (holds config.toml; all configured paths are relative to it)
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the generation pass (default)
    Build,
    /// Scan pages and show what would be generated, without writing
    Check,
    /// Print the scanned page model as JSON
    Scan,
    /// Generate one page per CSV row from a {{placeholder}} template
    Table,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let load = || config::load_config(&cli.root);

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let site_config = load()?;
            println!("==> Scanning {}", site_config.content_root().display());
            let report = generate::generate(&site_config)?;
            output::print_pages(&report.pages, &site_config.content_url_prefix());
            println!();
            output::print_build_output(&report, &site_config.output_root());
        }
        Command::Check => {
            let site_config = load()?;
            println!("==> Checking {}", site_config.content_root().display());
            let pages = scan::scan(&site_config)?;
            output::print_pages(&pages, &site_config.content_url_prefix());
            println!("==> Found {} pages", pages.len());
        }
        Command::Scan => {
            let pages = scan::scan(&load()?)?;
            println!("{}", serde_json::to_string_pretty(&pages)?);
        }
        Command::Table => {
            let site_config = load()?;
            let report = table::generate_table(&site_config)?;
            output::print_table_output(&report, &site_config.output_root());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
