#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub metadata: FileMetadata,
    pub content: Vec<u8>,
}
