//! Header discovery.
//!
//! Walks an input root and collects candidate source files. Parsing never
//! touches the filesystem itself; it only sees text loaded from the paths
//! returned here.

use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Recursively collects every `.h` file under `root`, sorted so generated
/// output is deterministic across platforms.
pub fn find_header_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut headers = Vec::new();
    walk(root, &mut headers)?;
    headers.sort();
    Ok(headers)
}

fn walk(dir: &Path, headers: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, headers)?;
        } else if path.extension().is_some_and(|ext| ext == "h") {
            debug!("found header {}", path.display());
            headers.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_finds_headers_recursively_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("modules/module_1");
        fs::create_dir_all(&nested).unwrap();

        fs::write(dir.path().join("b.h"), "").unwrap();
        fs::write(dir.path().join("a.h"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(nested.join("module_1.h"), "").unwrap();
        fs::write(nested.join("module_1.c"), "").unwrap();

        let headers = find_header_files(dir.path()).unwrap();
        let names: Vec<String> = headers
            .iter()
            .map(|p| {
                p.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(names, vec!["a.h", "b.h", "modules/module_1/module_1.h"]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no_such_dir");
        assert!(find_header_files(&missing).is_err());
    }
}
