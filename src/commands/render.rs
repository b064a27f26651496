use crate::{
    RenderArgs,
    assemble::{Assembler, PageRequest, TemplatePaths},
    chunks::ChunkMap,
    config::{base_path_from_config, resolve_path},
    hooks::Hooks,
};

pub async fn run(args: &RenderArgs) -> Result<(), anyhow::Error> {
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
    let base_path = base_path_from_config(&config_path);

    let templates = TemplatePaths::resolve(&config.templates, &base_path);
    let chunks = if args.production {
        ChunkMap::load(&resolve_path(&config.site.manifest, &base_path))?
    } else {
        ChunkMap::default()
    };
    let hooks = Hooks::new();

    let html = Assembler::new(&config, &templates, &chunks, &hooks).assemble(&PageRequest {
        path: args.path.clone(),
        is_production: args.production,
        minify: args.minify,
    })?;

    // stdout carries the document alone so it can be piped to a file
    print!("{html}");

    Ok(())
}
