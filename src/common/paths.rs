//! Configuration paths
//!
//! Uses the directories crate for platform-appropriate locations:
//! - Linux: `$XDG_CONFIG_HOME/bb-run-bot/` or `~/.config/bb-run-bot/`
//! - macOS: `~/Library/Application Support/bb-run-bot/`
//! - Windows: `%APPDATA%\bb-run-bot\`

use std::path::{Path, PathBuf};

/// Application directory name
const APP_NAME: &str = "bb-run-bot";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Resolve a program path for spawning from `root`
///
/// Relative paths with a directory component are anchored at `root`; bare
/// names are left for the PATH lookup.
pub fn resolve_program(root: &Path, program: &str) -> PathBuf {
    let path = Path::new(program);
    if path.is_relative() && path.components().count() > 1 {
        root.join(path)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_is_toml() {
        if let Some(path) = config_path() {
            assert_eq!(path.file_name().unwrap(), "config.toml");
        }
    }

    #[test]
    fn test_resolve_program() {
        let root = Path::new("/src");
        assert_eq!(resolve_program(root, "bash"), PathBuf::from("bash"));
        assert_eq!(
            resolve_program(root, "build/android/buildbot/bb_host_steps.py"),
            PathBuf::from("/src/build/android/buildbot/bb_host_steps.py")
        );
        assert_eq!(resolve_program(root, "/bin/sh"), PathBuf::from("/bin/sh"));
    }
}
