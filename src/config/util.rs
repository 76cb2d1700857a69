//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`
/// Returns the path to the config file if found
///
/// # Example
/// ```text
/// /home/user/site/docs/guide/   ← start
/// /home/user/site/sitefeed.toml ← found!
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.is_file().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_file_walks_up() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("docs/guide");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(tmp.path().join("sitefeed.toml"), "").unwrap();

        let found = find_config_file(Path::new("sitefeed.toml"), &nested).unwrap();
        assert_eq!(found, tmp.path().join("sitefeed.toml"));
    }

    #[test]
    fn test_find_config_file_absolute() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        assert!(find_config_file(&path, tmp.path()).is_none());

        std::fs::write(&path, "").unwrap();
        assert_eq!(find_config_file(&path, Path::new("/")), Some(path));
    }
}
