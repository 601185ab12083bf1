use crate::config::ImportSettings;
use crate::error::{ImportError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve the ARGOS files to scan. A single file is taken as-is; a
/// directory is listed (sorted by name, subdirectories ignored) and filtered
/// through the skip list and file pattern.
pub fn discover_input_files(input: &Path, settings: &ImportSettings) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(input)?;

    if metadata.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    if !metadata.is_dir() {
        return Err(ImportError::InvalidFormat(format!(
            "Input is neither a file nor a directory: {}",
            input.display()
        )));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(input)? {
        let entry = entry?;
        let path = entry.path();

        // metadata() follows symlinks
        if !fs::metadata(&path)?.is_file() {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|f| f.to_str()) else {
            debug!("Skipping non UTF-8 file name {}", path.display());
            continue;
        };

        if settings.should_skip(file_name) {
            debug!("Skipping {}", file_name);
            continue;
        }

        files.push(path);
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_listing_skips_readme() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("README.txt"), "not argos data")?;
        fs::write(dir.path().join("2003dg.txt"), "")?;
        fs::write(dir.path().join("1997dg.txt"), "")?;
        fs::create_dir(dir.path().join("nested"))?;

        let files = discover_input_files(dir.path(), &ImportSettings::default())?;
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["1997dg.txt", "2003dg.txt"]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_listing_follows_symlinks() -> Result<()> {
        let data = TempDir::new()?;
        let target = data.path().join("1997dg.txt");
        fs::write(&target, "")?;

        let dir = TempDir::new()?;
        std::os::unix::fs::symlink(&target, dir.path().join("linked.txt"))?;

        let files = discover_input_files(dir.path(), &ImportSettings::default())?;
        assert_eq!(files, vec![dir.path().join("linked.txt")]);
        Ok(())
    }

    #[test]
    fn test_single_file_input() -> Result<()> {
        let dir = TempDir::new()?;
        let file = dir.path().join("1997dg.txt");
        fs::write(&file, "")?;

        let files = discover_input_files(&file, &ImportSettings::default())?;
        assert_eq!(files, vec![file]);
        Ok(())
    }

    #[test]
    fn test_missing_input() {
        let result = discover_input_files(Path::new("/definitely/not/here"), &ImportSettings::default());
        assert!(matches!(result, Err(ImportError::Io(_))));
    }
}
