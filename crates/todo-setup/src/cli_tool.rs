//! Best-effort lookup of a command-line client on `PATH`.

use std::path::{Path, PathBuf};

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && (m.permissions().mode() & 0o111 != 0))
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file())
        .unwrap_or(false)
}

fn binary_name(name: &str) -> String {
    if cfg!(windows) && Path::new(name).extension().is_none() {
        format!("{name}.exe")
    } else {
        name.to_string()
    }
}

/// Searches `PATH` for an executable called `name`.
pub fn find_executable_in_path(name: &str) -> Option<PathBuf> {
    if name.trim().is_empty() {
        return None;
    }
    let path_var = std::env::var_os("PATH")?;
    let dirs = std::env::split_paths(&path_var).collect::<Vec<_>>();
    find_executable_in_dirs(name, &dirs)
}

/// Searches `dirs`, in order, for an executable called `name`.
pub fn find_executable_in_dirs(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    if name.trim().is_empty() {
        return None;
    }
    let name = binary_name(name.trim());
    dirs.iter()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(&name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_stub(dir: &Path, name: &str, executable: bool) -> PathBuf {
        let stub = dir.join(binary_name(name));
        fs::write(&stub, "#!/bin/sh\necho ok\n").expect("write stub");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = if executable { 0o755 } else { 0o644 };
            let mut perms = fs::metadata(&stub).expect("meta").permissions();
            perms.set_mode(mode);
            fs::set_permissions(&stub, perms).expect("chmod");
        }
        #[cfg(not(unix))]
        let _ = executable;
        stub
    }

    #[test]
    fn finds_stub_in_dirs() {
        let dir = tempfile::tempdir().expect("temp dir");
        let stub = write_stub(dir.path(), "sqlite3", true);

        let found = find_executable_in_dirs("sqlite3", &[dir.path().to_path_buf()]);
        assert_eq!(found, Some(stub));
    }

    #[test]
    fn earlier_dirs_win() {
        let first = tempfile::tempdir().expect("temp dir");
        let second = tempfile::tempdir().expect("temp dir");
        let expected = write_stub(first.path(), "sqlite3", true);
        write_stub(second.path(), "sqlite3", true);

        let dirs = [first.path().to_path_buf(), second.path().to_path_buf()];
        let found = find_executable_in_dirs("sqlite3", &dirs);
        assert_eq!(found, Some(expected));
    }

    #[cfg(unix)]
    #[test]
    fn skips_non_executable_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_stub(dir.path(), "sqlite3", false);

        assert_eq!(
            find_executable_in_dirs("sqlite3", &[dir.path().to_path_buf()]),
            None
        );
    }

    #[test]
    fn missing_tool_and_blank_name_yield_none() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert_eq!(
            find_executable_in_dirs("sqlite3", &[dir.path().to_path_buf(), PathBuf::new()]),
            None
        );
        assert_eq!(find_executable_in_dirs("  ", &[dir.path().to_path_buf()]), None);
        assert_eq!(find_executable_in_path(""), None);
    }
}
