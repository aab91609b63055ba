//! Output directory resolution.
//!
//! Windows machines keep the real desktop either locally or under a
//! OneDrive mirror (with a localized name on Spanish installs), so the
//! resolver probes the known locations in order instead of trusting a
//! single path.

use std::path::{Path, PathBuf};

/// First existing desktop directory under `home`, else `home` itself.
///
/// Pure given filesystem state; takes the home directory as a parameter
/// so tests can point it at a fixture tree.
pub fn desktop_dir(home: &Path) -> PathBuf {
    let candidates = [
        home.join("Desktop"),
        home.join("OneDrive").join("Desktop"),
        home.join("OneDrive").join("Escritorio"),
        home.join("Escritorio"),
    ];
    for candidate in candidates {
        if candidate.is_dir() {
            return candidate;
        }
    }
    home.to_path_buf()
}

/// Resolve the output directory for the current user.
pub fn output_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| desktop_dir(&home))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_prefers_plain_desktop() {
        let home = tempfile::tempdir().unwrap();
        fs::create_dir_all(home.path().join("Desktop")).unwrap();
        fs::create_dir_all(home.path().join("Escritorio")).unwrap();
        assert_eq!(desktop_dir(home.path()), home.path().join("Desktop"));
    }

    #[test]
    fn test_falls_through_to_onedrive_localized() {
        let home = tempfile::tempdir().unwrap();
        fs::create_dir_all(home.path().join("OneDrive").join("Escritorio")).unwrap();
        assert_eq!(
            desktop_dir(home.path()),
            home.path().join("OneDrive").join("Escritorio")
        );
    }

    #[test]
    fn test_defaults_to_home_when_nothing_exists() {
        let home = tempfile::tempdir().unwrap();
        assert_eq!(desktop_dir(home.path()), home.path());
    }
}
