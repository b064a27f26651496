use std::collections::HashMap;

use crate::{
    InitArgs,
    config::{PageConfig, ShellConfig, SiteConfig, TemplateConfig},
};

/// The document template scaffolded for new projects.
const DEFAULT_DOCUMENT: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{{ title | default(value="App") }}</title>
</head>
<body>
  <div id="root"></div>
</body>
</html>
"#;

pub async fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = if args.path.is_relative() {
        std::env::current_dir()?.join(&args.path)
    } else {
        args.path.clone()
    };

    if !path.exists() {
        if args.create {
            tokio::fs::create_dir_all(&path).await?;
            println!("Created directory {path}", path = path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    let default_config = ShellConfig {
        site: SiteConfig {
            library_name: "app".into(),
            public_path: "/".into(),
            base_url: None,
            output: "dist".into(),
            manifest: "dist/asset-manifest.json".into(),
        },
        export_static: None,
        templates: TemplateConfig::default(),
        pages: HashMap::from([(
            "/".to_string(),
            PageConfig {
                document: None,
                context: HashMap::from([(
                    "title".to_string(),
                    serde_json::Value::String("Home".to_string()),
                )]),
            },
        )]),
    };

    println!("Initializing project in {}", path.display());

    let config_text = serde_yaml::to_string(&default_config)?;
    tokio::fs::write(path.join("appshell.yaml"), config_text).await?;

    println!(
        "Created config file {config_file}",
        config_file = path.join("appshell.yaml").display()
    );

    tokio::fs::create_dir_all(path.join("templates")).await?;
    tokio::fs::write(path.join("templates/document.html"), DEFAULT_DOCUMENT).await?;

    println!(
        "Created default template {template}",
        template = path.join("templates/document.html").display()
    );

    Ok(())
}
