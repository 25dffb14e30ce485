use crate::index::InvertedIndex;
use crate::tokenizer::tokenize;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regular files under `root`, recursively, in file-name order.
/// A path that cannot be read is an error, not a skip.
pub fn list_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Ordered word tokens of one file. Invalid UTF-8 is replaced, not rejected.
pub fn read_tokens<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(tokenize(&String::from_utf8_lossy(&bytes)))
}

/// Build an index from every file under `root`, keyed by file path.
pub fn index_directory<P: AsRef<Path>>(root: P) -> Result<InvertedIndex> {
    let root = root.as_ref();
    let mut index = InvertedIndex::new();
    for file in list_files(root)? {
        let tokens = read_tokens(&file)?;
        index.add_document(file.to_string_lossy(), tokens);
    }
    tracing::info!(root = %root.display(), num_docs = index.num_docs(), num_terms = index.num_terms(), "indexed directory");
    Ok(index)
}
