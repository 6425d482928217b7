/// Static tool catalog
///
/// The tools the command bar knows about, the example commands it
/// features, and the quick actions shown under the input.

use serde::Serialize;
use std::fmt;

/// Tool category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Document,
    Image,
    Ai,
    Automation,
    Media,
    Data,
    Content,
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionCategory::Document => "document",
            ActionCategory::Image => "image",
            ActionCategory::Ai => "ai",
            ActionCategory::Automation => "automation",
            ActionCategory::Media => "media",
            ActionCategory::Data => "data",
            ActionCategory::Content => "content",
        };
        write!(f, "{}", s)
    }
}

/// A tool the command bar can chain into a workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolAction {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: ActionCategory,
    pub keywords: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<&'static str>,
}

impl ToolAction {
    /// Number of this tool's keywords found in an already lower-cased query
    pub fn keyword_hits(&self, lower_query: &str) -> usize {
        self.keywords
            .iter()
            .filter(|keyword| lower_query.contains(*keyword))
            .count()
    }

    /// Seconds this tool is expected to take
    ///
    /// The digits of `estimated_time` read as one number ("~10s" is 10).
    /// No estimate, or one without digits such as "varies", counts as
    /// [`DEFAULT_ESTIMATE_SECS`].
    pub fn estimated_seconds(&self) -> u32 {
        let digits: String = self
            .estimated_time
            .unwrap_or("")
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        digits.parse().unwrap_or(DEFAULT_ESTIMATE_SECS)
    }
}

/// Estimate used for tools without a numeric `estimated_time`
pub const DEFAULT_ESTIMATE_SECS: u32 = 5;

/// A one-click command prefill
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub command: &'static str,
}

/// Example commands, in display order. The first few are featured on an empty query.
pub const EXAMPLE_COMMANDS: &[&str] = &[
    "Resize this image, compress it, and generate a LinkedIn caption",
    "Convert this CSV to Excel and summarize the data",
    "Repurpose this blog into a Twitter thread and newsletter draft",
    "Extract text from PDF and translate to Spanish",
    "Create a social media calendar from my content brief",
    "Compress all images in folder and create a ZIP",
    "Generate SEO meta tags from this article",
    "Transcribe this video and create blog post",
];

/// Every tool, in catalog order. Matching and tie-breaking follow this order.
pub const AVAILABLE_TOOLS: &[ToolAction] = &[
    // Document
    ToolAction {
        id: "pdf-convert",
        name: "PDF Converter",
        description: "Convert documents to/from PDF",
        icon: "FileText",
        category: ActionCategory::Document,
        keywords: &["pdf", "convert", "document", "word", "excel"],
        estimated_time: Some("~5s"),
    },
    ToolAction {
        id: "pdf-extract",
        name: "PDF Text Extractor",
        description: "Extract text from PDF files",
        icon: "FileSearch",
        category: ActionCategory::Document,
        keywords: &["pdf", "extract", "text", "ocr"],
        estimated_time: Some("~3s"),
    },
    ToolAction {
        id: "doc-merge",
        name: "Document Merger",
        description: "Merge multiple documents",
        icon: "FilePlus",
        category: ActionCategory::Document,
        keywords: &["merge", "combine", "documents"],
        estimated_time: Some("~4s"),
    },
    // Image
    ToolAction {
        id: "image-resize",
        name: "Image Resizer",
        description: "Resize images to any dimension",
        icon: "Maximize2",
        category: ActionCategory::Image,
        keywords: &["resize", "image", "dimension", "scale"],
        estimated_time: Some("~2s"),
    },
    ToolAction {
        id: "image-compress",
        name: "Image Compressor",
        description: "Compress images without quality loss",
        icon: "Minimize2",
        category: ActionCategory::Image,
        keywords: &["compress", "image", "optimize", "reduce"],
        estimated_time: Some("~3s"),
    },
    ToolAction {
        id: "image-convert",
        name: "Image Converter",
        description: "Convert between image formats",
        icon: "RefreshCw",
        category: ActionCategory::Image,
        keywords: &["convert", "image", "format", "png", "jpg", "webp"],
        estimated_time: Some("~2s"),
    },
    // AI
    ToolAction {
        id: "ai-writer",
        name: "AI Writer",
        description: "Generate content with AI",
        icon: "Wand2",
        category: ActionCategory::Ai,
        keywords: &["write", "generate", "content", "ai", "text"],
        estimated_time: Some("~10s"),
    },
    ToolAction {
        id: "ai-summarize",
        name: "AI Summarizer",
        description: "Summarize long content",
        icon: "FileText",
        category: ActionCategory::Ai,
        keywords: &["summarize", "summary", "brief", "shorten"],
        estimated_time: Some("~8s"),
    },
    ToolAction {
        id: "ai-translate",
        name: "AI Translator",
        description: "Translate text to any language",
        icon: "Languages",
        category: ActionCategory::Ai,
        keywords: &["translate", "language", "spanish", "french", "german"],
        estimated_time: Some("~5s"),
    },
    ToolAction {
        id: "ai-caption",
        name: "Caption Generator",
        description: "Generate social media captions",
        icon: "MessageSquare",
        category: ActionCategory::Ai,
        keywords: &["caption", "social", "linkedin", "twitter", "instagram"],
        estimated_time: Some("~6s"),
    },
    // Content
    ToolAction {
        id: "content-repurpose",
        name: "Content Repurposer",
        description: "Transform content for different platforms",
        icon: "Repeat",
        category: ActionCategory::Content,
        keywords: &["repurpose", "transform", "blog", "thread", "newsletter"],
        estimated_time: Some("~15s"),
    },
    ToolAction {
        id: "seo-generator",
        name: "SEO Generator",
        description: "Generate SEO meta tags",
        icon: "Search",
        category: ActionCategory::Content,
        keywords: &["seo", "meta", "tags", "optimize"],
        estimated_time: Some("~4s"),
    },
    // Data
    ToolAction {
        id: "csv-convert",
        name: "CSV Converter",
        description: "Convert CSV to Excel and vice versa",
        icon: "Table",
        category: ActionCategory::Data,
        keywords: &["csv", "excel", "spreadsheet", "convert"],
        estimated_time: Some("~3s"),
    },
    ToolAction {
        id: "data-analyze",
        name: "Data Analyzer",
        description: "Analyze and visualize data",
        icon: "BarChart3",
        category: ActionCategory::Data,
        keywords: &["analyze", "data", "chart", "statistics"],
        estimated_time: Some("~8s"),
    },
    // Media
    ToolAction {
        id: "video-transcribe",
        name: "Video Transcriber",
        description: "Transcribe video to text",
        icon: "Video",
        category: ActionCategory::Media,
        keywords: &["video", "transcribe", "audio", "speech"],
        estimated_time: Some("~20s"),
    },
    ToolAction {
        id: "audio-convert",
        name: "Audio Converter",
        description: "Convert audio formats",
        icon: "Music",
        category: ActionCategory::Media,
        keywords: &["audio", "convert", "mp3", "wav"],
        estimated_time: Some("~5s"),
    },
    // Automation
    ToolAction {
        id: "batch-process",
        name: "Batch Processor",
        description: "Process multiple files at once",
        icon: "Layers",
        category: ActionCategory::Automation,
        keywords: &["batch", "bulk", "multiple", "folder"],
        estimated_time: Some("varies"),
    },
    ToolAction {
        id: "zip-create",
        name: "ZIP Creator",
        description: "Create ZIP archives",
        icon: "Archive",
        category: ActionCategory::Automation,
        keywords: &["zip", "archive", "compress", "folder"],
        estimated_time: Some("~5s"),
    },
];

pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        label: "PDF Tools",
        description: "Convert, merge, extract",
        icon: "FileText",
        command: "Convert PDF to Word document",
    },
    QuickAction {
        label: "AI Writer",
        description: "Generate any content",
        icon: "Wand2",
        command: "Write a professional email about project update",
    },
    QuickAction {
        label: "Image Tools",
        description: "Resize, compress, convert",
        icon: "Image",
        command: "Resize image to 1920x1080 and compress",
    },
    QuickAction {
        label: "Automations",
        description: "Run workflows",
        icon: "Zap",
        command: "Process all images in folder and create ZIP",
    },
    QuickAction {
        label: "Content AI",
        description: "Captions & posts",
        icon: "MessageSquare",
        command: "Generate LinkedIn caption for product launch",
    },
    QuickAction {
        label: "Repurpose",
        description: "Transform content",
        icon: "Repeat",
        command: "Repurpose this blog into a Twitter thread",
    },
    QuickAction {
        label: "Data Tools",
        description: "CSV, Excel, analyze",
        icon: "Table",
        command: "Convert CSV to Excel and summarize the data",
    },
    QuickAction {
        label: "Extract",
        description: "OCR & text extraction",
        icon: "FileSearch",
        command: "Extract text from PDF and translate to Spanish",
    },
];

/// Look a tool up by id
pub fn find_tool(id: &str) -> Option<&'static ToolAction> {
    AVAILABLE_TOOLS.iter().find(|tool| tool.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_estimated_seconds() {
        assert_eq!(find_tool("image-resize").unwrap().estimated_seconds(), 2);
        assert_eq!(find_tool("video-transcribe").unwrap().estimated_seconds(), 20);
        // "varies" has no digits
        assert_eq!(find_tool("batch-process").unwrap().estimated_seconds(), 5);
    }

    #[test]
    fn test_tool_ids_unique() {
        let ids: HashSet<_> = AVAILABLE_TOOLS.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), AVAILABLE_TOOLS.len());
        assert_eq!(AVAILABLE_TOOLS.len(), 18);
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for tool in AVAILABLE_TOOLS {
            for keyword in tool.keywords {
                assert_eq!(*keyword, keyword.to_lowercase(), "tool {}", tool.id);
            }
        }
    }

    #[test]
    fn test_keyword_hits() {
        let tool = find_tool("image-convert").unwrap();
        assert_eq!(tool.keyword_hits("convert png to jpg"), 3);
        assert_eq!(tool.keyword_hits("nothing here"), 0);
    }

    #[test]
    fn test_find_tool() {
        assert_eq!(find_tool("zip-create").unwrap().name, "ZIP Creator");
        assert!(find_tool("teleport").is_none());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ActionCategory::Ai.to_string(), "ai");
        assert_eq!(ActionCategory::Automation.to_string(), "automation");
    }
}
