//! Sandbox path helpers.

use std::path::PathBuf;

/// File name of the JSON store inside [`get_data_dir`].
pub const STORAGE_FILE_NAME: &str = "marquee.json";

/// Returns the data directory holding the session store and trace files.
///
/// Inside the Zellij sandbox `/host` maps to the directory Zellij was started
/// from, usually the home directory, so this resolves to
/// `~/.local/share/zellij/marquee` on the host.
///
/// ```
/// use marquee::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/marquee"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("marquee")
}

/// Maps a `~`-prefixed path onto the sandbox's `/host` mount.
///
/// ```
/// use marquee::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/marquee.toml"), "/etc/marquee.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_inside_path_is_left_alone() {
        assert_eq!(expand_tilde("themes/~backup.toml"), "themes/~backup.toml");
        assert_eq!(expand_tilde("~user/x"), "~user/x");
    }

    #[test]
    fn storage_file_lives_in_data_dir() {
        let path = get_data_dir().join(STORAGE_FILE_NAME);
        assert!(path.ends_with("zellij/marquee/marquee.json"));
    }
}
