use crate::loader::LoaderTrait;
use crate::loader::error::LoadingError;
use crate::loader::file::{File, FileMetadata};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Clone, Debug)]
pub struct FileSystemLoader {
    base_path: PathBuf,
}

impl FileSystemLoader {
    #[must_use]
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    // An empty path addresses the base path itself, which may point at a single file
    fn sub_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return self.base_path.clone();
        }
        self.base_path.join(path)
    }
}

impl LoaderTrait for FileSystemLoader {
    async fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<File, LoadingError> {
        let path = self.sub_path(path);
        tracing::trace!(?path, "Loading file");
        let content = fs::read(&path).await?;
        let metadata = FileMetadata {
            key: path.to_string_lossy().into(),
        };
        Ok(File { metadata, content })
    }
}
