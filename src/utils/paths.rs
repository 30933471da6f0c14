use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;

pub fn get_selmenu_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".selmenu"))
}

pub fn get_config_path() -> Result<PathBuf> {
    let dir = get_selmenu_dir()?;
    Ok(dir.join("config.toml"))
}

pub fn get_log_path() -> Result<PathBuf> {
    let dir = get_selmenu_dir()?;
    Ok(dir.join("selmenu.log"))
}

pub fn ensure_directories_exist() -> Result<()> {
    let dir = get_selmenu_dir()?;

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_selmenu_dir() {
        let dir = get_selmenu_dir().unwrap();
        assert!(dir.to_string_lossy().ends_with(".selmenu"));
    }

    #[test]
    fn test_get_config_path() {
        let path = get_config_path().unwrap();
        assert!(path.to_string_lossy().contains(".selmenu"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_get_log_path() {
        let path = get_log_path().unwrap();
        assert!(path.to_string_lossy().ends_with("selmenu.log"));
    }
}
