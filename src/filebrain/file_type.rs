// File type detection, per-type actions, and display formatting

use crate::filebrain::models::{FileAction, FileActionCategory, FileType};
use chrono::{DateTime, Local, Utc};
use regex::Regex;
use std::sync::OnceLock;

// Anything matching one of these is saved as a link, whatever its "extension"
const LINK_PATTERNS: &[&str] = &[r"^https?://"];

const EXTENSIONS: &[(&str, FileType)] = &[
    ("pdf", FileType::Pdf),
    ("jpg", FileType::Image),
    ("jpeg", FileType::Image),
    ("png", FileType::Image),
    ("gif", FileType::Image),
    ("webp", FileType::Image),
    ("svg", FileType::Image),
    ("csv", FileType::Csv),
    ("xlsx", FileType::Csv),
    ("xls", FileType::Csv),
    ("doc", FileType::Doc),
    ("docx", FileType::Doc),
    ("txt", FileType::Doc),
    ("md", FileType::Doc),
    ("rtf", FileType::Doc),
    ("mp4", FileType::Video),
    ("mov", FileType::Video),
    ("avi", FileType::Video),
    ("webm", FileType::Video),
    ("mp3", FileType::Audio),
    ("wav", FileType::Audio),
    ("aac", FileType::Audio),
    ("flac", FileType::Audio),
    ("zip", FileType::Archive),
    ("rar", FileType::Archive),
    ("7z", FileType::Archive),
    ("tar", FileType::Archive),
];

pub struct FileTypeDetector {
    link_regex: Vec<Regex>,
}

impl Default for FileTypeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTypeDetector {
    pub fn new() -> Self {
        let link_regex = LINK_PATTERNS
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect();

        Self { link_regex }
    }

    pub fn is_link(&self, name: &str) -> bool {
        self.link_regex.iter().any(|regex| regex.is_match(name))
    }

    /// Type of a file name or URL
    ///
    /// The extension is whatever follows the last dot. A name without a
    /// dot is all extension, so "pdf" on its own is a PDF.
    pub fn detect(&self, name: &str) -> FileType {
        if self.is_link(name) {
            return FileType::Link;
        }

        let extension = name.rsplit('.').next().unwrap_or("").to_lowercase();

        EXTENSIONS
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, file_type)| *file_type)
            .unwrap_or(FileType::Unknown)
    }
}

/// Detect with a shared detector
pub fn detect_file_type(name: &str) -> FileType {
    static DETECTOR: OnceLock<FileTypeDetector> = OnceLock::new();
    DETECTOR.get_or_init(FileTypeDetector::new).detect(name)
}

const PDF_ACTIONS: &[FileAction] = &[
    action("summarize", "Summarize", "Sparkles", FileActionCategory::Analyze, "AI-powered summary"),
    action("extract-text", "Extract Text", "FileOutput", FileActionCategory::Extract, "Get all text content"),
    action("convert-docx", "Convert to DOCX", "FileType", FileActionCategory::Transform, "Transform to Word format"),
    action("compress", "Compress", "Minimize2", FileActionCategory::Transform, "Reduce file size"),
];

const IMAGE_ACTIONS: &[FileAction] = &[
    action("resize", "Resize", "Maximize2", FileActionCategory::Transform, "Change dimensions"),
    action("compress", "Compress", "Minimize2", FileActionCategory::Transform, "Optimize file size"),
    action("convert", "Convert Format", "RefreshCw", FileActionCategory::Transform, "PNG, JPG, WebP"),
    action("remove-bg", "Remove Background", "Eraser", FileActionCategory::Transform, "AI background removal"),
    action("generate-alt", "Generate Alt Text", "MessageSquare", FileActionCategory::Analyze, "AI accessibility text"),
    action("extract-colors", "Extract Colors", "Palette", FileActionCategory::Extract, "Get color palette"),
];

const CSV_ACTIONS: &[FileAction] = &[
    action("analyze", "Analyze Data", "BarChart3", FileActionCategory::Analyze, "AI insights"),
    action("convert-excel", "Convert to Excel", "FileSpreadsheet", FileActionCategory::Transform, "Export as XLSX"),
    action("visualize", "Create Charts", "PieChart", FileActionCategory::Analyze, "Generate visualizations"),
    action("clean", "Clean Data", "Sparkles", FileActionCategory::Transform, "Remove duplicates, fix errors"),
];

const DOC_ACTIONS: &[FileAction] = &[
    action("summarize", "Summarize", "Sparkles", FileActionCategory::Analyze, "AI-powered summary"),
    action("convert-pdf", "Convert to PDF", "FileText", FileActionCategory::Transform, "Export as PDF"),
    action("repurpose", "Repurpose Content", "Repeat", FileActionCategory::Transform, "Blog → Thread, Newsletter"),
    action("translate", "Translate", "Languages", FileActionCategory::Transform, "Multi-language support"),
];

const LINK_ACTIONS: &[FileAction] = &[
    action("scrape", "Extract Content", "Download", FileActionCategory::Extract, "Get page content"),
    action("screenshot", "Screenshot", "Camera", FileActionCategory::Extract, "Capture full page"),
    action("summarize", "Summarize", "Sparkles", FileActionCategory::Analyze, "AI summary of page"),
    action("archive", "Archive", "Archive", FileActionCategory::Transform, "Save permanently"),
];

const VIDEO_ACTIONS: &[FileAction] = &[
    action("compress", "Compress", "Minimize2", FileActionCategory::Transform, "Reduce file size"),
    action("extract-audio", "Extract Audio", "Music", FileActionCategory::Extract, "Get audio track"),
    action("transcribe", "Transcribe", "FileText", FileActionCategory::Extract, "Speech to text"),
    action("clip", "Create Clips", "Scissors", FileActionCategory::Transform, "Cut short segments"),
];

const AUDIO_ACTIONS: &[FileAction] = &[
    action("transcribe", "Transcribe", "FileText", FileActionCategory::Extract, "Speech to text"),
    action("convert", "Convert Format", "RefreshCw", FileActionCategory::Transform, "MP3, WAV, AAC"),
    action("compress", "Compress", "Minimize2", FileActionCategory::Transform, "Reduce file size"),
];

const ARCHIVE_ACTIONS: &[FileAction] = &[
    action("extract", "Extract Files", "FolderOpen", FileActionCategory::Extract, "Unzip contents"),
    action("list", "List Contents", "List", FileActionCategory::Analyze, "View file structure"),
];

const UNKNOWN_ACTIONS: &[FileAction] = &[
    action("analyze", "Analyze", "Search", FileActionCategory::Analyze, "Detect file type"),
];

const fn action(
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    category: FileActionCategory,
    description: &'static str,
) -> FileAction {
    FileAction {
        id,
        label,
        icon,
        category,
        description,
    }
}

/// Actions offered for a file type
pub fn actions_for(file_type: FileType) -> &'static [FileAction] {
    match file_type {
        FileType::Pdf => PDF_ACTIONS,
        FileType::Image => IMAGE_ACTIONS,
        FileType::Csv => CSV_ACTIONS,
        FileType::Doc => DOC_ACTIONS,
        FileType::Link => LINK_ACTIONS,
        FileType::Video => VIDEO_ACTIONS,
        FileType::Audio => AUDIO_ACTIONS,
        FileType::Archive => ARCHIVE_ACTIONS,
        FileType::Unknown => UNKNOWN_ACTIONS,
    }
}

/// Actions for a type grouped by category, categories in first-seen order
pub fn grouped_actions(file_type: FileType) -> Vec<(FileActionCategory, Vec<&'static FileAction>)> {
    let mut groups: Vec<(FileActionCategory, Vec<&'static FileAction>)> = Vec::new();

    for action in actions_for(file_type) {
        match groups.iter_mut().find(|(category, _)| *category == action.category) {
            Some((_, actions)) => actions.push(action),
            None => groups.push((action.category, vec![action])),
        }
    }

    groups
}

/// Human-readable size: "0 B", "500 B", "1.5 KB", "2.3 MB"
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.1}", value);
    let trimmed = rounded.strip_suffix(".0").unwrap_or(&rounded);
    format!("{} {}", trimmed, UNITS[unit])
}

/// Relative time like "5m ago". Older than a week shows the local date.
pub fn format_time_ago(when: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - when).num_seconds();

    if seconds < 60 {
        "Just now".to_string()
    } else if seconds < 3_600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{}h ago", seconds / 3_600)
    } else if seconds < 604_800 {
        format!("{}d ago", seconds / 86_400)
    } else {
        when.with_timezone(&Local).format("%-m/%-d/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(detect_file_type("Q4 Report.PDF"), FileType::Pdf);
        assert_eq!(detect_file_type("banner.webp"), FileType::Image);
        assert_eq!(detect_file_type("export.xlsx"), FileType::Csv);
        assert_eq!(detect_file_type("notes.md"), FileType::Doc);
        assert_eq!(detect_file_type("clip.mov"), FileType::Video);
        assert_eq!(detect_file_type("song.flac"), FileType::Audio);
        assert_eq!(detect_file_type("backup.7z"), FileType::Archive);
    }

    #[test]
    fn test_detect_uses_last_extension() {
        assert_eq!(detect_file_type("site.backup.tar"), FileType::Archive);
        assert_eq!(detect_file_type("bundle.tar.gz"), FileType::Unknown);
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect_file_type("README"), FileType::Unknown);
        // no dot: the whole name is the extension
        assert_eq!(detect_file_type("pdf"), FileType::Pdf);
        assert_eq!(detect_file_type("PNG"), FileType::Image);
        assert_eq!(detect_file_type("trailing."), FileType::Unknown);
        assert_eq!(detect_file_type(""), FileType::Unknown);
    }

    #[test]
    fn test_detect_links() {
        assert_eq!(detect_file_type("https://example.com/report.pdf"), FileType::Link);
        assert_eq!(detect_file_type("http://example.com"), FileType::Link);
        assert_eq!(detect_file_type("ftp://example.com/a.pdf"), FileType::Pdf);
    }

    #[test]
    fn test_every_type_has_actions() {
        for file_type in FileType::ALL {
            assert!(!actions_for(file_type).is_empty(), "{}", file_type);
        }
        assert_eq!(actions_for(FileType::Image).len(), 6);
    }

    #[test]
    fn test_grouped_actions() {
        let groups = grouped_actions(FileType::Pdf);
        let categories: Vec<_> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            categories,
            vec![
                FileActionCategory::Analyze,
                FileActionCategory::Extract,
                FileActionCategory::Transform
            ]
        );
        assert_eq!(groups[2].1.len(), 2);
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(500), "500 B");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2_456_000), "2.3 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }

    #[test]
    fn test_format_time_ago() {
        let now = Utc::now();
        assert_eq!(format_time_ago(now - Duration::seconds(30), now), "Just now");
        assert_eq!(format_time_ago(now - Duration::minutes(15), now), "15m ago");
        assert_eq!(format_time_ago(now - Duration::hours(4), now), "4h ago");
        assert_eq!(format_time_ago(now - Duration::days(2), now), "2d ago");

        let old = format_time_ago(now - Duration::days(30), now);
        assert_eq!(old.matches('/').count(), 2);
    }
}
