//! Filesystem locations.
//!
//! Every lookup has a variant taking the environment values as parameters, so
//! tests never touch the process environment.

use std::path::PathBuf;

/// Directory name used under the XDG data and config homes.
pub const APP_DIR: &str = "pickmenu";

/// Returns the data directory, `$XDG_DATA_HOME/pickmenu` or
/// `$HOME/.local/share/pickmenu`.
///
/// Returns `None` when neither variable is set to an absolute path.
#[must_use]
pub fn get_data_dir() -> Option<PathBuf> {
    data_dir_from(
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

/// [`get_data_dir`] with explicit environment values.
///
/// ```
/// use pickmenu::infrastructure::paths::data_dir_from;
/// use std::path::PathBuf;
///
/// let dir = data_dir_from(None, Some(PathBuf::from("/home/ada")));
/// assert_eq!(dir, Some(PathBuf::from("/home/ada/.local/share/pickmenu")));
/// ```
#[must_use]
pub fn data_dir_from(xdg_data_home: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    xdg_base(xdg_data_home, home, &[".local", "share"])
}

/// Returns the default config file, `$XDG_CONFIG_HOME/pickmenu/config.toml` or
/// `$HOME/.config/pickmenu/config.toml`.
#[must_use]
pub fn get_config_file() -> Option<PathBuf> {
    config_file_from(
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

/// [`get_config_file`] with explicit environment values.
#[must_use]
pub fn config_file_from(xdg_config_home: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    xdg_base(xdg_config_home, home, &[".config"]).map(|dir| dir.join("config.toml"))
}

fn xdg_base(xdg: Option<PathBuf>, home: Option<PathBuf>, fallback: &[&str]) -> Option<PathBuf> {
    if let Some(base) = xdg.filter(|p| p.is_absolute()) {
        return Some(base.join(APP_DIR));
    }
    let mut base = home.filter(|p| p.is_absolute())?;
    base.extend(fallback);
    Some(base.join(APP_DIR))
}

/// Expands a leading `~` to `$HOME`. Other paths are returned unchanged, and
/// so is `~` itself when `HOME` is unset.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, std::env::var_os("HOME").map(PathBuf::from))
}

/// [`expand_tilde`] with an explicit home directory.
///
/// ```
/// use pickmenu::infrastructure::paths::expand_tilde_with;
/// use std::path::PathBuf;
///
/// let home = Some(PathBuf::from("/home/ada"));
/// assert_eq!(expand_tilde_with("~/themes/dusk.toml", home.clone()), PathBuf::from("/home/ada/themes/dusk.toml"));
/// assert_eq!(expand_tilde_with("~", home.clone()), PathBuf::from("/home/ada"));
/// assert_eq!(expand_tilde_with("/etc/pickmenu.toml", home), PathBuf::from("/etc/pickmenu.toml"));
/// ```
#[must_use]
pub fn expand_tilde_with(path: &str, home: Option<PathBuf>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_wins_over_home() {
        let dir = data_dir_from(Some("/xdg/data".into()), Some("/home/ada".into()));
        assert_eq!(dir, Some(PathBuf::from("/xdg/data/pickmenu")));
    }

    #[test]
    fn relative_values_are_ignored() {
        assert_eq!(data_dir_from(Some("rel".into()), None), None);
        assert_eq!(
            config_file_from(Some("rel".into()), Some("/home/ada".into())),
            Some(PathBuf::from("/home/ada/.config/pickmenu/config.toml"))
        );
    }

    #[test]
    fn tilde_needs_home() {
        assert_eq!(expand_tilde_with("~/x", None), PathBuf::from("~/x"));
        assert_eq!(expand_tilde_with("~user/x", Some("/home/ada".into())), PathBuf::from("~user/x"));
    }
}
