//! Matrix-file discovery.
//!
//! Finds declarative matrix files on disk so the CLI (or an embedding
//! runner) can plan whole directories at once. The returned list is sorted
//! to keep planning order deterministic across runs and filesystems.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Recursively discovers `*.matrix.yaml` / `*.matrix.yml` files under
/// `root`, sorted by path.
pub fn discover_matrix_files<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_matrix_file(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

fn is_matrix_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".matrix.yaml") || name.ends_with(".matrix.yml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_matrix_suffixes_match() {
        assert!(is_matrix_file(Path::new("suites/arith.matrix.yaml")));
        assert!(is_matrix_file(Path::new("suites/arith.matrix.yml")));
        assert!(!is_matrix_file(Path::new("suites/arith.yaml")));
        assert!(!is_matrix_file(Path::new("suites/matrix.txt")));
    }
}
