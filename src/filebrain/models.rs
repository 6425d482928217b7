/// Data models for the file brain
///
/// File records are metadata only. Nothing here ever holds file bytes.

use crate::error::{PineError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// File kind, derived from the extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Pdf,
    Image,
    Csv,
    Doc,
    Link,
    Video,
    Audio,
    Archive,
    Unknown,
}

impl FileType {
    pub const ALL: [FileType; 9] = [
        FileType::Pdf,
        FileType::Image,
        FileType::Csv,
        FileType::Doc,
        FileType::Link,
        FileType::Video,
        FileType::Audio,
        FileType::Archive,
        FileType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Image => "image",
            FileType::Csv => "csv",
            FileType::Doc => "doc",
            FileType::Link => "link",
            FileType::Video => "video",
            FileType::Audio => "audio",
            FileType::Archive => "archive",
            FileType::Unknown => "unknown",
        }
    }

    /// Plural label used by the type filter
    pub fn label(&self) -> &'static str {
        match self {
            FileType::Pdf => "PDFs",
            FileType::Image => "Images",
            FileType::Csv => "Spreadsheets",
            FileType::Doc => "Documents",
            FileType::Link => "Links",
            FileType::Video => "Videos",
            FileType::Audio => "Audio",
            FileType::Archive => "Archives",
            FileType::Unknown => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FileType::Pdf | FileType::Doc => "FileText",
            FileType::Image => "Image",
            FileType::Csv => "Table",
            FileType::Link => "Link",
            FileType::Video => "Video",
            FileType::Audio => "Music",
            FileType::Archive => "Archive",
            FileType::Unknown => "File",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = PineError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        FileType::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| PineError::InvalidInput(format!("unknown file type '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Processing,
    Ready,
    Error,
}

/// A remembered file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Bytes. Links are 0.
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
    pub usage_count: u32,
    pub thumbnail: Option<String>,
    pub tags: Vec<String>,
    pub status: FileStatus,
    /// Free-form note on how the file was used
    pub context: Option<String>,
}

impl FileItem {
    /// Case-insensitive match on the name or any tag
    pub fn matches_search(&self, lower_query: &str) -> bool {
        self.name.to_lowercase().contains(lower_query)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(lower_query))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileActionCategory {
    Transform,
    Analyze,
    Extract,
    Share,
}

impl FileActionCategory {
    pub fn label(&self) -> &'static str {
        match self {
            FileActionCategory::Transform => "Transform",
            FileActionCategory::Analyze => "Analyze",
            FileActionCategory::Extract => "Extract",
            FileActionCategory::Share => "Share",
        }
    }
}

/// Something the detail panel offers to do with a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAction {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub category: FileActionCategory,
    pub description: &'static str,
}

/// One line of the file timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileActivity {
    pub id: String,
    pub file_id: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub result: Option<String>,
}

/// Grid or list layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Type filter: everything, or a single type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum FileFilter {
    #[default]
    All,
    Only(FileType),
}

impl FileFilter {
    pub fn accepts(&self, file_type: FileType) -> bool {
        match self {
            FileFilter::All => true,
            FileFilter::Only(wanted) => *wanted == file_type,
        }
    }
}

impl FromStr for FileFilter {
    type Err = PineError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(FileFilter::All)
        } else {
            s.parse().map(FileFilter::Only)
        }
    }
}

/// A file handed to the upload simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}
