use clap::{Parser, Subcommand};
use json_pages::config::{self, ExportConfig};
use json_pages::{export, input, output};
use std::path::{Path, PathBuf};

/// Where posts come from and per-run overrides of `json-pages.toml`.
#[derive(clap::Args, Clone)]
struct ExportArgs {
    /// Post dump: a JSON file or a directory of per-post JSON files
    /// (defaults to <project>/posts.json)
    #[arg(long)]
    posts: Option<PathBuf>,

    /// Posts per pagination page (overrides per_page)
    #[arg(long)]
    per_page: Option<usize>,

    /// Generated-content root, relative to --project (overrides content_root)
    #[arg(long)]
    content_root: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "json-pages")]
#[command(about = "Export blog posts as paginated JSON")]
#[command(long_about = "\
Export blog posts as paginated JSON

Reads the post records produced by a site generator and writes:

  <content_root>/json/pagination/<n>.json   pages of post summaries
  <content_root>/json/post/<path>.json      one detail record per post

Both directories are emptied first. Settings are read from json-pages.toml
in the project directory; run 'json-pages gen-config' for a documented one.")]
#[command(version)]
struct Cli {
    /// Project directory containing json-pages.toml
    #[arg(long, default_value = ".", global = true)]
    project: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write pagination and post JSON files
    Export(ExportArgs),
    /// Validate posts and config, and list the files an export would write
    Check(ExportArgs),
    /// Print a stock json-pages.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Export(args) => {
            let config = resolve_config(&cli.project, &args)?;
            let posts_path = posts_path(&cli.project, &args);
            println!("==> Loading posts from {}", posts_path.display());
            let posts = input::load_posts(&posts_path)?;
            let report = export::export(&posts, &config)?;
            output::print_export_output(&report);
        }
        Command::Check(args) => {
            let config = resolve_config(&cli.project, &args)?;
            let posts_path = posts_path(&cli.project, &args);
            println!("==> Checking {}", posts_path.display());
            let posts = input::load_posts(&posts_path)?;
            let plan = export::plan(&posts, &config)?;
            output::print_check_output(&plan.report(&config));
            println!("==> Posts are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `json-pages.toml`, apply CLI overrides, and root it at the project.
fn resolve_config(project: &Path, args: &ExportArgs) -> Result<ExportConfig, config::ConfigError> {
    let mut config = config::load_config(project)?;
    if let Some(per_page) = args.per_page {
        config.per_page = per_page;
    }
    if let Some(root) = &args.content_root {
        config.content_root = root.clone();
    }
    config.validate()?;
    Ok(config.rooted_at(project))
}

fn posts_path(project: &Path, args: &ExportArgs) -> PathBuf {
    args.posts
        .clone()
        .unwrap_or_else(|| project.join("posts.json"))
}
