//! Reading and writing the newline-delimited domain list

use crate::domain::violations::BurnerResult;
use std::fs;
use std::path::Path;

/// Split list content into entries, stripping trailing whitespace from each line
pub fn parse_entries(content: &str) -> Vec<String> {
    content.lines().map(|line| line.trim_end().to_string()).collect()
}

/// Read a list file into its entries
pub fn read_entries<P: AsRef<Path>>(path: P) -> BurnerResult<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_entries(&content))
}

/// Replace the file content by writing a sibling file and renaming it over the original
pub fn write_list<P: AsRef<Path>>(path: P, content: &str) -> BurnerResult<()> {
    let path = path.as_ref();
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, content)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    tracing::debug!("Rewrote {}", path.display());
    Ok(())
}
