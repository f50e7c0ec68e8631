mod config;

pub use config::Config;

use std::path::PathBuf;

/// Returns the configuration directory.
///
/// `GAPSHIELD_CONFIG_DIR` wins when set. Otherwise `~/.config/gapshield[-dev]/`
/// based on `GAPSHIELD_ENV` (set `GAPSHIELD_ENV=dev` for the development dir).
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("GAPSHIELD_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("GAPSHIELD_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("gapshield-dev")
            } else {
                base_dir.join("gapshield")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
