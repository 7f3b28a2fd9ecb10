//! Source file discovery
//!
//! Lists the `.xml` entries of a directory in lexicographic file-name
//! order. The order is load-bearing: it decides both ingestion order and
//! the direction of the chain links.

use std::io;
use std::path::{Path, PathBuf};

/// Suffix a file name must carry to be ingested (case-sensitive)
pub const XML_SUFFIX: &str = ".xml";

/// Named filter predicate for discovery
pub fn has_suffix(name: &str, suffix: &str) -> bool {
    name.ends_with(suffix)
}

/// List the files in `directory` whose name ends in [`XML_SUFFIX`],
/// sorted ascending by file name.
///
/// Entries without a UTF-8 name never match the suffix and are skipped.
/// No distinction is made between regular files, symlinks and other
/// entry kinds; a non-readable entry surfaces later when it is read.
pub fn discover_files(directory: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            if has_suffix(name, XML_SUFFIX) {
                files.push(entry.path());
            }
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
