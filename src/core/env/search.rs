use std::env;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// The PATH search list: an ordered snapshot of the directories named by
/// the `PATH` environment variable. Immutable once built; `setenv PATH`
/// replaces the whole list with a fresh snapshot.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Snapshot the current `PATH`.
    pub fn from_env() -> Self {
        let path = env::var("PATH").unwrap_or_default();
        Self::from_str_path(&path)
    }

    pub fn from_str_path(path: &str) -> Self {
        let dirs = path
            .split(':')
            .filter(|part| !part.is_empty())
            .map(PathBuf::from)
            .collect();
        SearchPath { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// First directory containing an executable entry named `command`.
    pub fn resolve(&self, command: &str) -> Option<PathBuf> {
        self.dirs.iter().find_map(|dir| {
            let candidate = dir.join(command);
            is_executable(&candidate).then_some(candidate)
        })
    }

    /// Every executable match across the search list, in order.
    pub fn resolve_all(&self, command: &str) -> Vec<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| dir.join(command))
            .filter(|candidate| is_executable(candidate))
            .collect()
    }
}

fn is_executable(path: &Path) -> bool {
    match path.metadata() {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn place_executable(dir: &Path, name: &str) -> PathBuf {
        let file = dir.join(name);
        fs::write(&file, "#!/bin/sh\n").unwrap();
        let mut perms = fs::metadata(&file).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&file, perms).unwrap();
        file
    }

    #[test]
    fn test_split_and_skip_empty_segments() {
        let search = SearchPath::from_str_path("/usr/bin::/bin");
        assert_eq!(
            search.dirs(),
            &[PathBuf::from("/usr/bin"), PathBuf::from("/bin")]
        );
    }

    #[test]
    fn test_resolve_first_match() {
        let dir_a = scratch_dir("vena_search_a");
        let dir_b = scratch_dir("vena_search_b");
        let expected = place_executable(&dir_a, "tool");
        place_executable(&dir_b, "tool");

        let search = SearchPath::from_str_path(&format!(
            "{}:{}",
            dir_a.display(),
            dir_b.display()
        ));
        assert_eq!(search.resolve("tool"), Some(expected));
        assert_eq!(search.resolve_all("tool").len(), 2);
    }

    #[test]
    fn test_resolve_skips_non_executable() {
        let dir = scratch_dir("vena_search_noexec");
        let file = dir.join("data");
        fs::write(&file, "plain").unwrap();
        let mut perms = fs::metadata(&file).unwrap().permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&file, perms).unwrap();

        let search = SearchPath::from_str_path(&dir.display().to_string());
        assert_eq!(search.resolve("data"), None);
    }

    #[test]
    fn test_resolve_missing_command() {
        let search = SearchPath::from_str_path("/nonexistent_dir_for_vena");
        assert_eq!(search.resolve("nothing"), None);
        assert!(search.resolve_all("nothing").is_empty());
    }
}
