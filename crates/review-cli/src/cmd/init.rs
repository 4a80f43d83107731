use anyhow::Context;
use review_core::{config::Config, io, paths};
use std::path::Path;

const EMPTY_PROPOSALS: &str = "{\n  \"results\": []\n}\n";
const EMPTY_DATA: &str = "{}\n";

pub fn run(root: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let board_name = name.map(str::to_string).unwrap_or_else(|| {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "board".to_string())
    });

    println!("Initializing review board in: {}", root.display());

    let dir = paths::review_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let config = if paths::config_path(root).exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
        Config::load(root).context("failed to read config.yaml")?
    } else {
        let cfg = Config::new(&board_name);
        cfg.save(root).context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
        cfg
    };

    for (path, content, label) in [
        (config.proposals_path(root), EMPTY_PROPOSALS, &config.proposals_file),
        (config.data_path(root), EMPTY_DATA, &config.data_file),
    ] {
        if io::write_if_missing(&path, content.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?
        {
            println!("  created: {label}");
        } else {
            println!("  exists:  {label}");
        }
    }

    Ok(())
}
