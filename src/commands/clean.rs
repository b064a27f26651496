use crate::{
    CleanArgs,
    config::{ShellConfig, base_path_from_config, resolve_path},
};

pub async fn run(args: &CleanArgs) -> Result<(), anyhow::Error> {
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

    let config = ShellConfig::load_from_arg(Some(config_path.as_path())).await?;

    // Get the base path for resolving relative paths
    let base_path = base_path_from_config(&config_path);

    // Delete the generated output folder
    let output_dir = resolve_path(&config.site.output, &base_path);
    if output_dir.exists() {
        if args.dry_run {
            println!("Would delete {}", output_dir.display());
        } else {
            tokio::fs::remove_dir_all(&output_dir).await?;
            println!("Deleted {}", output_dir.display());
        }
    }

    Ok(())
}
