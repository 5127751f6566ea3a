use std::io::{self, Write};

use crate::config::Config;
use crate::error::{NotifyError, Result};

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        print!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        );
        let input = prompt_line()?;

        if !input.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Teams Notify Configuration");
    println!("==========================\n");

    // Webhook URL or KMS-encrypted blob
    print!("Enter the Teams webhook URL (or a KMS-encrypted, base64 value): ");
    let hook_url = prompt_line()?;

    if hook_url.is_empty() {
        return Err(NotifyError::MissingHookUrl);
    }

    print!("Hide link targets in posted cards? [y/N] ");
    let hide_links = prompt_line()?.eq_ignore_ascii_case("y");

    // Create config directory if it doesn't exist
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| NotifyError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    std::fs::write(&config_path, render_config(&hook_url, hide_links)).map_err(|e| {
        NotifyError::ConfigRead {
            path: config_path.clone(),
            source: e,
        }
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'teams-notify send'!");

    Ok(())
}

fn prompt_line() -> Result<String> {
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn render_config(hook_url: &str, hide_links: bool) -> String {
    let mut content = format!("hook_url = {}\n", toml_string(hook_url));
    if hide_links {
        content.push_str("hide_links = true\n");
    }
    content
}

fn toml_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
