use std::path::{Path, PathBuf};

use crate::{
    BuildArgs,
    assemble::{Assembler, PageRequest, TemplatePaths},
    chunks::ChunkMap,
    config::{ShellConfig, base_path_from_config, resolve_path},
    hooks::Hooks,
};

/// What a full-site build produced.
pub struct BuildOutcome {
    pub output_dir: PathBuf,
    pub pages: usize,
}

pub async fn run(args: &BuildArgs) -> Result<(), anyhow::Error> {
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

    let config = load_config(&config_path).await?;

    // Get the base path for resolving relative paths
    let base_path = base_path_from_config(&config_path);

    let outcome = build_site(&config, &base_path, args.production, args.minify)?;

    println!(
        "Built {} page(s) to {}",
        outcome.pages,
        outcome.output_dir.display()
    );

    Ok(())
}

/// Load the config, surfacing the legacy `BASE_URL` environment variable
/// into it when the file leaves `base_url` unset.
pub(crate) async fn load_config(config_path: &Path) -> Result<ShellConfig, anyhow::Error> {
    let mut config = ShellConfig::load_from_arg(Some(config_path)).await?;

    if config.site.base_url.is_none()
        && let Ok(base_url) = std::env::var("BASE_URL")
    {
        config.site.base_url = Some(base_url);
    }

    Ok(config)
}

/// Assemble every configured page and write it under the output directory.
pub(crate) fn build_site(
    config: &ShellConfig,
    base_path: &Path,
    production: bool,
    minify: bool,
) -> Result<BuildOutcome, anyhow::Error> {
    let templates = TemplatePaths::resolve(&config.templates, base_path);

    // The chunk manifest only matters in production; development builds
    // reference logical bundle names the dev server resolves.
    let chunks = if production {
        ChunkMap::load(&resolve_path(&config.site.manifest, base_path))?
    } else {
        ChunkMap::default()
    };

    let hooks = Hooks::new();
    let assembler = Assembler::new(config, &templates, &chunks, &hooks);

    let output_dir = resolve_path(&config.site.output, base_path);
    std::fs::create_dir_all(&output_dir)?;

    // Deterministic build order regardless of map iteration; a project with
    // no pages configured still gets its root document.
    let mut routes: Vec<String> = config.pages.keys().cloned().collect();
    routes.sort();
    if routes.is_empty() {
        routes.push("/".to_string());
    }

    let html_suffix = config
        .export_static
        .as_ref()
        .is_some_and(|export| export.html_suffix);

    for route in &routes {
        let request = PageRequest {
            path: route.clone(),
            is_production: production,
            minify,
        };
        let html = assembler.assemble(&request)?;

        let output_path = route_output_path(route, &output_dir, html_suffix);
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&output_path, html)?;

        println!("  - {} -> {}", route, output_path.display());
    }

    Ok(BuildOutcome {
        output_dir,
        pages: routes.len(),
    })
}

/// Where a route's document lands in the output directory.
///
/// # Examples
/// ```ignore
/// route_output_path("/users/profile", out, false) => out/users/profile/index.html
/// route_output_path("/users/profile", out, true) => out/users/profile.html
/// route_output_path("/", out, false) => out/index.html
/// ```
fn route_output_path(route: &str, output_dir: &Path, html_suffix: bool) -> PathBuf {
    let trimmed = route.trim_matches('/');

    if trimmed.is_empty() {
        output_dir.join("index.html")
    } else if html_suffix {
        output_dir.join(format!("{trimmed}.html"))
    } else {
        output_dir.join(trimmed).join("index.html")
    }
}
