// src/model/metadata.rs
use serde::{Deserialize, Serialize};

/// Where an object was declared.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Path of the file relative to the project root
    pub repo_file_path: String,
    pub file_slice: FileSlice,
}

/// The slice of a file holding a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileSlice {
    pub filename: String,
    #[serde(default)]
    pub content: String,
    pub start_line_number: usize,
    pub end_line_number: usize,
}

impl Metadata {
    pub fn new(repo_file_path: impl Into<String>, start_line_number: usize) -> Self {
        let repo_file_path = repo_file_path.into();
        let filename = repo_file_path
            .rsplit('/')
            .next()
            .unwrap_or(repo_file_path.as_str())
            .to_string();
        Self {
            file_slice: FileSlice {
                filename,
                content: String::new(),
                start_line_number,
                end_line_number: start_line_number,
            },
            repo_file_path,
        }
    }
}
