use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod assemble;
mod chunks;
mod commands;
mod config;
mod hooks;
mod serve;

#[derive(Parser)]
struct Args {
    /// The command to execute
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the project in
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct BuildArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "appshell.yaml")]
    config_file: Option<PathBuf>,

    /// Resolve bundles through the chunk manifest and include the CSS bundle
    #[arg(short, long, default_value = "false")]
    production: bool,

    /// Minify the generated documents
    #[arg(short, long, default_value = "false")]
    minify: bool,
}

#[derive(Parser)]
struct RenderArgs {
    /// The route path to render, e.g. "/" or "/users/profile"
    path: String,

    /// The path to the configuration file
    #[arg(short, long, default_value = "appshell.yaml")]
    config_file: Option<PathBuf>,

    /// Resolve bundles through the chunk manifest and include the CSS bundle
    #[arg(short, long, default_value = "false")]
    production: bool,

    /// Minify the generated document
    #[arg(short, long, default_value = "false")]
    minify: bool,
}

#[derive(Parser)]
struct ServeArgs {
    /// The address to bind to
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// The port to bind to
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Open the site in the default browser
    #[arg(short, long, default_value = "false")]
    open: bool,

    /// The path to the configuration file
    #[arg(short, long, default_value = "appshell.yaml")]
    config_file: Option<PathBuf>,

    /// Whether to watch for changes and rebuild automatically
    #[arg(short, long, default_value = "true")]
    watch: bool,

    /// Resolve bundles through the chunk manifest and include the CSS bundle
    #[arg(long, default_value = "false")]
    production: bool,

    /// Minify the generated documents
    #[arg(long, default_value = "false")]
    minify: bool,
}

#[derive(Parser)]
struct CleanArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "appshell.yaml")]
    config_file: Option<PathBuf>,

    /// Print what would be deleted without deleting anything
    #[arg(long, default_value = "false")]
    dry_run: bool,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Initialize a new appshell project
    Init(InitArgs),

    /// Build an HTML document for every configured page
    Build(BuildArgs),

    /// Render a single route's document to stdout
    Render(RenderArgs),

    /// Serve the built documents on a local port
    Serve(ServeArgs),

    /// Remove the generated output directory
    Clean(CleanArgs),
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    match args.command {
        ShellCommand::Init(args) => {
            commands::init::run(&args).await?;
        }
        ShellCommand::Build(args) => {
            commands::build::run(&args).await?;
        }
        ShellCommand::Render(args) => {
            commands::render::run(&args).await?;
        }
        ShellCommand::Serve(args) => {
            commands::serve::run(&args).await?;
        }
        ShellCommand::Clean(args) => {
            commands::clean::run(&args).await?;
        }
    }

    Ok(())
}
