use std::{
    collections::HashMap,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};

/// Raw bytes of a file read from disk, remembered under the path it came from.
#[derive(Clone, Debug)]
pub struct Asset {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Keeps loaded assets in the order they were requested.
// font fallback depends on that order, so lookups go through the map but iteration goes through `order`
pub struct Loader {
    assets: HashMap<PathBuf, Asset>,
    order: Vec<PathBuf>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn get<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<&Asset> {
        self.assets
            .get(path.as_ref())
            .ok_or(anyhow!(
                "Path '{}' doesn't exist in asset map.",
                path.as_ref().display()
            ))
    }

    /// Reads `path` into memory. Loading the same path twice keeps its first position.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if self.assets.contains_key(path) {
            log::debug!("asset {} already loaded", path.display());
            return Ok(());
        }

        let mut file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .with_context(|| format!("failed to read {}", path.display()))?;
        log::debug!("loaded {} ({} bytes)", path.display(), bytes.len());

        self.order.push(path.to_path_buf());
        self.assets.insert(
            path.to_path_buf(),
            Asset {
                path: path.to_path_buf(),
                bytes,
            },
        );
        Ok(())
    }

    /// Assets in load order.
    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.order.iter().filter_map(|path| self.assets.get(path))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn assets_keep_load_order() {
        let dir = tempfile::tempdir().unwrap();
        let b = dir.path().join("b.ttf");
        let a = dir.path().join("a.ttf");
        fs::write(&b, [2u8, 2]).unwrap();
        fs::write(&a, [1u8]).unwrap();

        let mut loader = Loader::new();
        loader.load(&b).unwrap();
        loader.load(&a).unwrap();
        loader.load(&b).unwrap();

        let paths: Vec<_> = loader.assets().map(|asset| asset.path.clone()).collect();
        assert_eq!(paths, vec![b.clone(), a.clone()]);
        assert_eq!(loader.len(), 2);
        assert_eq!(loader.get(&b).unwrap().bytes, vec![2, 2]);
        assert_eq!(loader.get(&a).unwrap().bytes, vec![1]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = Loader::new();
        let err = loader.load(dir.path().join("nope.ttf")).unwrap_err();
        assert!(err.to_string().contains("failed to open"));
        assert!(loader.is_empty());
    }

    #[test]
    fn unknown_path_lookup_fails() {
        let loader = Loader::default();
        assert!(loader.get("/fonts/missing.ttf").is_err());
    }
}
