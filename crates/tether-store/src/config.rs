use std::path::PathBuf;
use std::rc::Rc;

use crate::{FileStore, KeyValueStore, Namespaced};

/// Where the durable store lives and how its keys are scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory name under the platform data directory.
    pub app_name: String,
    pub file_name: String,
    /// Explicit document path; overrides `app_name`/`file_name` resolution.
    pub path: Option<PathBuf>,
    pub namespace: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            app_name: "tether".into(),
            file_name: "storage.json".into(),
            path: None,
            namespace: None,
        }
    }
}

impl StoreConfig {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            ..Self::default()
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Resolve the document path: the explicit path, else the local data
    /// directory, else `~/.{app_name}`, else the working directory.
    pub fn path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }

        if let Some(mut path) = dirs::data_local_dir() {
            path.push(&self.app_name);
            path.push(&self.file_name);
            return path;
        }

        if let Some(mut path) = dirs::home_dir() {
            path.push(format!(".{}", self.app_name));
            path.push(&self.file_name);
            return path;
        }

        PathBuf::from(&self.file_name)
    }

    /// Open the file-backed store this config describes.
    pub fn open(&self) -> Rc<dyn KeyValueStore> {
        let file = FileStore::from_config(self);
        log::debug!("opening store at {}", file.path().display());
        match &self.namespace {
            Some(ns) => Rc::new(Namespaced::new(file, ns)),
            None => Rc::new(file),
        }
    }
}
