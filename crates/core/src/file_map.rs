//! Resolution of logical data file names to paths on disk.

use std::path::{Path, PathBuf};

/// Maps a logical file name (e.g. `GEODATA/WORLD.DAT`) to a concrete path.
///
/// Resolution never fails by itself; a name that matches nothing still
/// yields a path, and opening it reports the error with that path.
pub trait ResolveFile {
    fn resolve(&self, name: &str) -> PathBuf;
}

impl<F> ResolveFile for F
where
    F: Fn(&str) -> PathBuf,
{
    fn resolve(&self, name: &str) -> PathBuf {
        self(name)
    }
}

/// Layered data directories. Later roots override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMap {
    roots: Vec<PathBuf>,
}

impl FileMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.push_root(root);
        self
    }

    pub fn push_root(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl ResolveFile for FileMap {
    fn resolve(&self, name: &str) -> PathBuf {
        let rel = Path::new(name);
        if let Some(found) = self
            .roots
            .iter()
            .rev()
            .map(|root| root.join(rel))
            .find(|p| p.is_file())
        {
            return found;
        }
        match self.roots.first() {
            Some(root) => root.join(rel),
            None => rel.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "geoscape-file-map-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn later_root_overrides_earlier() {
        let base = scratch_dir("base");
        let modded = scratch_dir("mod");
        fs::write(base.join("WORLD.DAT"), b"").unwrap();
        fs::write(modded.join("WORLD.DAT"), b"").unwrap();

        let map = FileMap::new().with_root(&base).with_root(&modded);
        assert_eq!(map.resolve("WORLD.DAT"), modded.join("WORLD.DAT"));
    }

    #[test]
    fn falls_back_to_first_root_when_missing() {
        let base = scratch_dir("missing");
        let map = FileMap::new().with_root(&base).with_root("/nonexistent-root");
        assert_eq!(map.resolve("NOPE.DAT"), base.join("NOPE.DAT"));
    }

    #[test]
    fn no_roots_passes_name_through() {
        assert_eq!(FileMap::new().resolve("a/b.dat"), PathBuf::from("a/b.dat"));
    }

    #[test]
    fn closures_resolve_files() {
        let resolver = |name: &str| PathBuf::from("/data").join(name);
        assert_eq!(resolver.resolve("x.dat"), PathBuf::from("/data/x.dat"));
    }
}
