use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use tower_http::services::ServeDir;

use crate::{
    ServeArgs,
    assemble::TemplatePaths,
    config::{base_path_from_config, resolve_path},
    serve::{ChangeKind, FileWatcher, PathClassifier, WatchEvent, WatchPaths},
};

pub async fn run(args: &ServeArgs) -> Result<(), anyhow::Error> {
    // Determine the config file path
    let config_path = args
        .config_file
        .clone()
        .unwrap_or_else(|| "appshell.yaml".into());
    let config_path = if config_path.is_relative() {
        std::env::current_dir()?.join(&config_path)
    } else {
        config_path
    };

    let config = super::build::load_config(&config_path).await?;

    // Get the base path for resolving relative paths
    let base_path = base_path_from_config(&config_path);

    // Build the site first
    println!("Building site...");
    let outcome = super::build::build_site(&config, &base_path, args.production, args.minify)?;
    println!("Built {} page(s)", outcome.pages);

    // Set up file watcher if enabled
    let _watcher_handle = if args.watch {
        let templates = TemplatePaths::resolve(&config.templates, &base_path);

        // Canonicalize watched paths so they match the paths notify reports
        let mut template_dirs: Vec<PathBuf> = Vec::new();
        for document in [&templates.default_document, &templates.page_document] {
            if let Some(parent) = document.parent() {
                let canonical = parent.canonicalize().unwrap_or_else(|_| parent.to_path_buf());
                if !template_dirs.contains(&canonical) {
                    template_dirs.push(canonical);
                }
            }
        }

        let manifest_path = resolve_path(&config.site.manifest, &base_path);
        let watch_paths = WatchPaths {
            config_path: config_path
                .canonicalize()
                .unwrap_or_else(|_| config_path.clone()),
            template_dirs,
            manifest_path: manifest_path
                .canonicalize()
                .unwrap_or_else(|_| manifest_path.clone()),
        };

        let classifier = PathClassifier::new(watch_paths.clone());

        match FileWatcher::new(&watch_paths, classifier) {
            Ok(watcher) => {
                println!("Watching for changes...");

                // Spawn rebuild task
                let rebuild_config = config.clone();
                let rebuild_base = base_path.clone();
                let production = args.production;
                let minify = args.minify;

                Some(tokio::task::spawn_blocking(move || {
                    while let Some(event) = watcher.recv() {
                        match event {
                            WatchEvent::FilesChanged(changes) => {
                                println!("\nDetected {} change(s), rebuilding...", changes.len());

                                if changes.iter().any(|c| matches!(c, ChangeKind::Config)) {
                                    println!(
                                        "Config changed; restart serve to apply new settings"
                                    );
                                }

                                match super::build::build_site(
                                    &rebuild_config,
                                    &rebuild_base,
                                    production,
                                    minify,
                                ) {
                                    Ok(outcome) => {
                                        println!("Rebuilt {} page(s)", outcome.pages);
                                    }
                                    Err(e) => {
                                        eprintln!("Build error: {e}");
                                    }
                                }
                            }
                            WatchEvent::Error(e) => {
                                eprintln!("Watch error: {e}");
                            }
                        }
                    }
                }))
            }
            Err(e) => {
                eprintln!("Warning: Failed to start file watcher: {e}");
                None
            }
        }
    } else {
        None
    };

    // Create the static file server
    let serve_dir = ServeDir::new(&outcome.output_dir).append_index_html_on_directories(true);
    let app = Router::new().fallback_service(serve_dir);

    // Parse the address
    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;

    // Determine the URL to display
    let display_host = if args.bind == "0.0.0.0" {
        "localhost"
    } else {
        &args.bind
    };
    let url = format!("http://{}:{}", display_host, args.port);

    println!("\nServing site at {url}");
    println!("Press Ctrl+C to stop\n");

    // Open browser if requested
    if args.open
        && let Err(e) = open::that(&url)
    {
        eprintln!("Failed to open browser: {e}");
    }

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
