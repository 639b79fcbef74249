//! Path helpers

use std::path::PathBuf;

/// Expand a user-supplied path to an absolute path.
///
/// `~` and `~/...` resolve against the home directory, relative paths
/// (including bare names) against the current directory. Absolute paths are
/// returned unchanged and nothing is canonicalized.
///
/// ```text
/// expand_path("~/.feiras")        // -> /home/user/.feiras
/// expand_path("./feiras.csv")     // -> /current/dir/./feiras.csv
/// expand_path("/etc/feiras.json") // -> /etc/feiras.json
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = if path == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(path))
    } else if let Some(rest) = path.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        }
    } else {
        PathBuf::from(path)
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn test_expand_path_absolute_unchanged() {
        assert_eq!(expand_path("/etc/feiras.json"), PathBuf::from("/etc/feiras.json"));
    }

    #[test]
    fn test_expand_path_relative_becomes_absolute() {
        for input in [".", "..", "./.feiras", "../data", "feiras.csv"] {
            let result = expand_path(input);
            assert!(result.is_absolute(), "{input} should become absolute");
        }
        assert!(expand_path("data/feiras.csv").ends_with("data/feiras.csv"));
    }

    #[test]
    fn test_expand_path_tilde() {
        let result = expand_path("~/.feiras");
        assert!(result.is_absolute());
        assert!(!result.to_string_lossy().contains('~'));
        assert!(result.ends_with(".feiras"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_expand_path_trims_whitespace() {
        assert_eq!(expand_path("  /path/to/dir  "), PathBuf::from("/path/to/dir"));
    }

    #[test]
    fn test_expand_path_empty_is_current_dir() {
        assert!(expand_path("").is_absolute());
        assert!(expand_path("   ").is_absolute());
    }
}
