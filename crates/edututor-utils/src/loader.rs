use crate::loader::error::LoadingError;
use crate::loader::file::File;
use crate::loader::file_system::FileSystemLoader;
use std::path::{Path, PathBuf};
use url::Url;

pub mod error;
pub mod file;
pub mod file_system;

/// Resolves a configured location into a loader.
///
/// Accepts `file://` urls as well as plain filesystem paths, relative paths are
/// resolved against the working directory.
pub fn loader(location: &str) -> Result<FileSystemLoader, LoadingError> {
    match Url::parse(location) {
        Ok(url) if url.scheme() == "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| LoadingError::InvalidURL(url.to_string()))?;
            Ok(FileSystemLoader::new(path))
        }
        Ok(url) if url.scheme().len() > 1 => Err(LoadingError::UnsupportedScheme(url.scheme().to_string())),
        // Bare paths have no scheme, Windows drive letters parse as a single letter scheme
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => Ok(FileSystemLoader::new(PathBuf::from(location))),
        Err(error) => Err(error.into()),
    }
}

pub trait LoaderTrait {
    fn load_file<P: AsRef<Path>>(&self, path: P) -> impl Future<Output = Result<File, LoadingError>>;
}
