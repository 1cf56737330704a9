use anyhow::Result;

use crate::Context;
use crate::config::{Config, ENV_TOKEN, ENV_URL};
use crate::paths;
use crate::ui;

pub fn run(_ctx: &Context) -> Result<()> {
    ui::header("Configuration");

    let path = paths::config_file()?;
    println!();
    ui::kv("Config file", &path.display().to_string());
    if !path.exists() {
        ui::dim("Not found; using environment only");
    }

    let config = Config::load()?;
    println!();
    ui::kv(
        "Instance URL",
        config.instance_url.as_deref().unwrap_or("(not set)"),
    );
    ui::kv(
        "Token",
        if config.token.is_some() { "set" } else { "(not set)" },
    );
    if let Some(secs) = config.timeout_secs {
        ui::kv("Timeout", &format!("{secs}s"));
    }

    println!();
    match config.connection() {
        Ok(_) => ui::success("Ready to sync"),
        Err(e) => {
            ui::warn(&e.to_string());
            ui::dim(&format!("{ENV_URL} and {ENV_TOKEN} override the file."));
        }
    }

    Ok(())
}
