//! Source (S1): produce one raw record per line from a bounded text
//! source (spec.md §4.1). Delivers bytes exactly; does not parse.
//!
//! File discovery is an external collaborator (spec.md §1's Non-goal),
//! so this accepts an explicit list of paths rather than implementing a
//! watcher; a directory is expanded to its files sorted by name so the
//! CLI's `run` subcommand can pass either a file or a directory through
//! unchanged.

use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Expand `path` into a sorted list of file paths: itself if it's a
/// file, or its immediate children (sorted by name) if it's a directory.
pub fn resolve_paths(path: &Path) -> std::io::Result<Vec<PathBuf>> {
    if path.is_dir() {
        let mut entries: Vec<PathBuf> = std::fs::read_dir(path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.is_file())
            .collect();
        entries.sort();
        Ok(entries)
    } else {
        Ok(vec![path.to_path_buf()])
    }
}

/// Read every line from every file in `paths`, in order, yielding each
/// raw line. Lines are not parsed here — that is S2's job.
pub async fn read_lines(paths: &[PathBuf]) -> std::io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for path in paths {
        let file = File::open(path).await?;
        let mut reader = BufReader::new(file).lines();
        while let Some(line) = reader.next_line().await? {
            lines.push(line);
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[tokio::test]
    async fn reads_every_line_from_a_single_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.jsonl");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "line one").unwrap();
        writeln!(file, "line two").unwrap();

        let lines = read_lines(&[path]).await.unwrap();
        assert_eq!(lines, vec!["line one", "line two"]);
    }

    #[tokio::test]
    async fn resolve_paths_expands_directory_sorted_by_name() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.jsonl"), "").unwrap();
        std::fs::write(dir.path().join("a.jsonl"), "").unwrap();

        let paths = resolve_paths(dir.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.jsonl", "b.jsonl"]);
    }

    #[tokio::test]
    async fn resolve_paths_passes_a_single_file_through() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("only.jsonl");
        std::fs::write(&path, "").unwrap();
        let paths = resolve_paths(&path).unwrap();
        assert_eq!(paths, vec![path]);
    }
}
