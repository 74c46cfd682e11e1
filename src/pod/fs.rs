use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use walkdir::WalkDir;

use super::{
    BLUEPRINT_NAME, CONTENT_ROOT, Collection, Document, DocumentFormat, Node, PODSPEC_PATH, Pod,
    Podspec, Row, StorageError, document::parse_fields, parse_document,
};

/// A pod stored in a directory on disk.
pub struct FsPod {
    root: PathBuf,
    podspec: Podspec,
}

impl FsPod {
    /// Open the pod rooted at `root`. A missing podspec is treated as empty.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        let fallback_project = root
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("pod")
            .to_string();

        let podspec_file = root.join(PODSPEC_PATH.trim_start_matches('/'));
        let podspec = if podspec_file.is_file() {
            let content = fs::read_to_string(&podspec_file)
                .map_err(|e| StorageError::io(PODSPEC_PATH, e))?;
            Podspec::parse(&content, &fallback_project)?
        } else {
            Podspec::empty(&fallback_project)
        };

        Ok(Self { root, podspec })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location of a pod path.
    pub fn abs_path(&self, pod_path: &str) -> PathBuf {
        self.root.join(pod_path.trim_start_matches('/'))
    }

    fn to_pod_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();
        format!("/{}", parts.join("/"))
    }

    fn read_text(&self, pod_path: &str) -> Result<String, StorageError> {
        fs::read_to_string(self.abs_path(pod_path)).map_err(|e| StorageError::io(pod_path, e))
    }

    fn blueprint_locales(&self, collection_path: &str) -> Result<Vec<String>, StorageError> {
        let blueprint_path = super::join_pod_path(collection_path, BLUEPRINT_NAME);
        let content = self.read_text(&blueprint_path)?;
        let blueprint = parse_fields(&blueprint_path, &content)?;
        Ok(blueprint
            .get_path("localization.locales")
            .map(Node::string_list)
            .unwrap_or_default())
    }
}

impl Pod for FsPod {
    fn list_collections(&self) -> Result<Vec<Collection>, StorageError> {
        let content_dir = self.abs_path(CONTENT_ROOT);
        if !content_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut collections = Vec::new();
        for entry in WalkDir::new(&content_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| StorageError::io(CONTENT_ROOT, e.into()))?;
            if entry.file_type().is_dir() && entry.path().join(BLUEPRINT_NAME).is_file() {
                let pod_path = self.to_pod_path(entry.path());
                let locales = self.blueprint_locales(&pod_path)?;
                collections.push(Collection { pod_path, locales });
            }
        }
        Ok(collections)
    }

    fn list_docs(
        &self,
        collection: &Collection,
        include_hidden: bool,
    ) -> Result<Vec<Document>, StorageError> {
        let mut documents = Vec::new();
        for pod_path in self.list_dir(&collection.pod_path, true)? {
            if pod_path.ends_with(&format!("/{}", BLUEPRINT_NAME)) {
                continue;
            }
            let Some(format) = DocumentFormat::from_path(&pod_path) else {
                continue;
            };
            let content = self.read_text(&pod_path)?;
            let parts = parse_document(&pod_path, &content, format, &collection.locales)?;
            let hidden = parts.first().is_some_and(|doc| doc.hidden);
            if hidden && !include_hidden {
                continue;
            }
            documents.extend(parts);
        }
        Ok(documents)
    }

    fn list_dir(&self, pod_path: &str, recursive: bool) -> Result<Vec<String>, StorageError> {
        let dir = self.abs_path(pod_path);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut walker = WalkDir::new(&dir).min_depth(1).sort_by_file_name();
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut paths = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| StorageError::io(pod_path, e.into()))?;
            if entry.file_type().is_file() {
                paths.push(self.to_pod_path(entry.path()));
            }
        }
        Ok(paths)
    }

    fn read_csv(&self, pod_path: &str) -> Result<Vec<Row>, StorageError> {
        let content = self.read_file(pod_path)?;
        let csv_error = |source| StorageError::Csv {
            path: pod_path.to_string(),
            source,
        };

        let mut reader = csv::Reader::from_reader(content.as_slice());
        let headers = reader.headers().map_err(csv_error)?.clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            let line = record.position().map_or(0, |p| p.line() as usize);
            let fields = headers
                .iter()
                .zip(record.iter())
                .map(|(key, value)| (key.to_string(), Node::String(value.to_string())))
                .collect();
            rows.push(Row {
                line,
                fields: Node::Object(fields),
            });
        }
        Ok(rows)
    }

    fn get_doc(&self, pod_path: &str) -> Result<Vec<Document>, StorageError> {
        let content = self.read_text(pod_path)?;
        let format = DocumentFormat::from_path(pod_path).unwrap_or(DocumentFormat::Yaml);
        parse_document(pod_path, &content, format, &[])
    }

    fn podspec(&self) -> &Podspec {
        &self.podspec
    }

    fn read_file(&self, pod_path: &str) -> Result<Vec<u8>, StorageError> {
        fs::read(self.abs_path(pod_path)).map_err(|e| StorageError::io(pod_path, e))
    }

    fn write_file(&self, pod_path: &str, content: &[u8]) -> Result<(), StorageError> {
        let path = self.abs_path(pod_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(pod_path, e))?;
        }
        fs::write(&path, content).map_err(|e| StorageError::io(pod_path, e))
    }

    fn file_exists(&self, pod_path: &str) -> bool {
        self.abs_path(pod_path).is_file()
    }

    fn modified(&self, pod_path: &str) -> Result<Option<SystemTime>, StorageError> {
        let path = self.abs_path(pod_path);
        if !path.exists() {
            return Ok(None);
        }
        let metadata = fs::metadata(&path).map_err(|e| StorageError::io(pod_path, e))?;
        let modified = metadata
            .modified()
            .map_err(|e| StorageError::io(pod_path, e))?;
        Ok(Some(modified))
    }
}
