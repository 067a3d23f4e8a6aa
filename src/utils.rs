//! Path helpers.

use std::path::PathBuf;

/// Joins a directory path with a sub path and returns it as a string.
///
/// Non UTF-8 characters are replaced, the bot only builds paths from its own
/// configuration.
///
/// # Examples
///
/// ```
/// # use dankbot::utils::get_path;
/// let path = get_path("./data", "session");
/// assert_eq!(path, "./data/session");
/// ```
pub fn get_path(dir_path: &str, subdir_path: &str) -> String {
    let path: PathBuf = [dir_path, subdir_path].iter().collect();
    path.to_string_lossy().into_owned()
}
