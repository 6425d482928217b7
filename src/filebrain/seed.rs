// Demo files and activities the file brain starts with.
// Timestamps are offsets from `now` so the timeline always looks fresh.

use crate::filebrain::models::{FileActivity, FileItem, FileStatus, FileType};
use chrono::{DateTime, Duration, Utc};

struct DemoFile {
    id: &'static str,
    name: &'static str,
    file_type: FileType,
    size: u64,
    uploaded_ago: Duration,
    used_ago: Duration,
    usage_count: u32,
    tags: &'static [&'static str],
    context: &'static str,
}

pub fn demo_files(now: DateTime<Utc>) -> Vec<FileItem> {
    let demos = [
        DemoFile {
            id: "1",
            name: "Q4 Financial Report.pdf",
            file_type: FileType::Pdf,
            size: 2_456_000,
            uploaded_ago: Duration::days(2),
            used_ago: Duration::hours(1),
            usage_count: 5,
            tags: &["finance", "quarterly", "report"],
            context: "Used for quarterly summary generation",
        },
        DemoFile {
            id: "2",
            name: "Product Hero Banner.png",
            file_type: FileType::Image,
            size: 1_234_000,
            uploaded_ago: Duration::days(5),
            used_ago: Duration::hours(2),
            usage_count: 12,
            tags: &["marketing", "banner", "product"],
            context: "Resized for social media 3 times",
        },
        DemoFile {
            id: "3",
            name: "Customer Data Export.csv",
            file_type: FileType::Csv,
            size: 567_000,
            uploaded_ago: Duration::days(1),
            used_ago: Duration::minutes(30),
            usage_count: 8,
            tags: &["customers", "data", "export"],
            context: "Analyzed for customer insights",
        },
        DemoFile {
            id: "4",
            name: "Blog Post Draft.docx",
            file_type: FileType::Doc,
            size: 45_000,
            uploaded_ago: Duration::hours(4),
            used_ago: Duration::minutes(15),
            usage_count: 3,
            tags: &["blog", "content", "draft"],
            context: "Repurposed into Twitter thread",
        },
        DemoFile {
            id: "5",
            name: "https://example.com/article",
            file_type: FileType::Link,
            size: 0,
            uploaded_ago: Duration::hours(2),
            used_ago: Duration::minutes(10),
            usage_count: 2,
            tags: &["reference", "article"],
            context: "Summarized for research",
        },
    ];

    demos
        .into_iter()
        .map(|demo| FileItem {
            id: demo.id.to_string(),
            name: demo.name.to_string(),
            file_type: demo.file_type,
            size: demo.size,
            uploaded_at: now - demo.uploaded_ago,
            last_used_at: now - demo.used_ago,
            usage_count: demo.usage_count,
            thumbnail: None,
            tags: demo.tags.iter().map(|t| t.to_string()).collect(),
            status: FileStatus::Ready,
            context: Some(demo.context.to_string()),
        })
        .collect()
}

pub fn demo_activities(now: DateTime<Utc>) -> Vec<FileActivity> {
    let demos: [(&str, &str, &str, Duration); 5] = [
        ("1", "4", "Repurposed to Twitter thread", Duration::minutes(15)),
        ("2", "3", "Generated data insights", Duration::minutes(30)),
        ("3", "2", "Resized to 1200x630", Duration::hours(2)),
        ("4", "1", "Created executive summary", Duration::days(1)),
        ("5", "2", "Compressed by 45%", Duration::days(2)),
    ];

    demos
        .into_iter()
        .map(|(id, file_id, action, ago)| FileActivity {
            id: id.to_string(),
            file_id: file_id.to_string(),
            action: action.to_string(),
            timestamp: now - ago,
            result: None,
        })
        .collect()
}
