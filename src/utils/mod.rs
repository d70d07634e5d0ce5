pub mod probe;
pub mod time;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// Every non-directory entry below `input`, at any depth. Symlinks are not followed.
pub fn get_walker(input: &Path) -> impl Iterator<Item = Result<walkdir::DirEntry, walkdir::Error>> {
    WalkDir::new(input)
        .into_iter()
        .filter(|entry| match entry {
            Ok(e) => !e.file_type().is_dir(),
            Err(_) => true,
        })
}

// Immediate children of `dir`, joined onto it.
pub fn list_dir(dir: &Path) -> io::Result<Vec<PathBuf>> {
    fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn walker_yields_files_at_every_depth() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("c");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("a").join("b.mp3"), b"").unwrap();
        fs::write(nested.join("d.mp3"), b"").unwrap();

        let mut found: Vec<PathBuf> = get_walker(dir.path())
            .map(|e| e.unwrap().into_path())
            .collect();
        found.sort();

        assert_eq!(
            found,
            vec![dir.path().join("a").join("b.mp3"), nested.join("d.mp3")]
        );
    }

    #[test]
    fn list_dir_is_one_level() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("deep.mp3"), b"").unwrap();
        fs::write(dir.path().join("top.mp3"), b"").unwrap();

        let mut children = list_dir(dir.path()).unwrap();
        children.sort();

        assert_eq!(
            children,
            vec![dir.path().join("sub"), dir.path().join("top.mp3")]
        );
    }

    #[test]
    fn list_dir_of_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let err = list_dir(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
