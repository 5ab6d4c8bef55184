use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Where rendered pages and copied assets end up: on disk for a static
/// build, in memory when serving.
pub trait Store {
    type Error: std::error::Error;

    /// Stores a rendered page under its site-relative route path
    /// (`/`, `/experience`, `/404`, ...).
    fn store_page(&self, route_path: &str, html: String) -> Result<(), Self::Error>;

    /// Stores a static asset under its path relative to the static dir.
    fn store_asset(&self, path: &Path, contents: Vec<u8>) -> Result<(), Self::Error>;
}

pub struct DiskStorage {
    output_path: PathBuf,
}

impl DiskStorage {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    /// Pages land flat in the output dir: `/` becomes `index.html`,
    /// `/experience` becomes `experience.html`.
    fn page_file_name(route_path: &str) -> String {
        let name = route_path.trim_matches('/');
        if name.is_empty() {
            "index.html".to_string()
        } else {
            format!("{name}.html")
        }
    }
}

impl Store for DiskStorage {
    type Error = io::Error;

    fn store_page(&self, route_path: &str, html: String) -> Result<(), Self::Error> {
        fs::create_dir_all(&self.output_path)?;

        let output_path = self.output_path.join(Self::page_file_name(route_path));
        let mut output_file = File::create(&output_path)?;

        output_file.write_all(html.as_bytes())?;

        Ok(())
    }

    fn store_asset(&self, path: &Path, contents: Vec<u8>) -> Result<(), Self::Error> {
        let output_path = self.output_path.join("static").join(path);

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut output_file = File::create(&output_path)?;
        output_file.write_all(&contents)?;

        Ok(())
    }
}

pub struct InMemoryStorage {
    storage: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new(storage: Arc<RwLock<HashMap<String, String>>>) -> Self {
        Self { storage }
    }
}

#[derive(Error, Debug)]
pub enum InMemoryStorageError {
    #[error("poisoned")]
    Poisoned,
}

impl Store for InMemoryStorage {
    type Error = InMemoryStorageError;

    fn store_page(&self, route_path: &str, html: String) -> Result<(), Self::Error> {
        self.storage
            .write()
            .map_err(|_| InMemoryStorageError::Poisoned)?
            .insert(route_path.to_string(), html);

        Ok(())
    }

    fn store_asset(&self, _path: &Path, _contents: Vec<u8>) -> Result<(), Self::Error> {
        // Serving mode reads static files straight from disk.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_page_file_names() {
        assert_eq!(DiskStorage::page_file_name("/"), "index.html");
        assert_eq!(DiskStorage::page_file_name("/experience"), "experience.html");
        assert_eq!(DiskStorage::page_file_name("/404"), "404.html");
    }

    #[test]
    fn test_disk_storage_writes_pages_and_assets() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DiskStorage::new(dir.path().to_owned());

        storage
            .store_page("/", "<html>index</html>".to_string())
            .unwrap();
        storage
            .store_page("/projects", "<html>projects</html>".to_string())
            .unwrap();
        storage
            .store_asset(Path::new("css/main.css"), b"body {}".to_vec())
            .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("index.html")).unwrap(),
            "<html>index</html>"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("projects.html")).unwrap(),
            "<html>projects</html>"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("static/css/main.css")).unwrap(),
            "body {}"
        );
    }

    #[test]
    fn test_in_memory_storage_keys_by_route() {
        let map = Arc::new(RwLock::new(HashMap::new()));
        let storage = InMemoryStorage::new(map.clone());

        storage
            .store_page("/experience", "<html></html>".to_string())
            .unwrap();

        assert_eq!(
            map.read().unwrap().get("/experience").map(String::as_str),
            Some("<html></html>")
        );
    }
}
