/// Pages and dashboard content
///
/// The route table behind the sidebar, plus the static stat cards and
/// recent-activity feed on the dashboard.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Dashboard,
    Command,
    FileBrain,
    ContentStudio,
    Automations,
    MediaTools,
    Settings,
}

impl Page {
    /// Sidebar order
    pub const ALL: [Page; 7] = [
        Page::Dashboard,
        Page::Command,
        Page::FileBrain,
        Page::ContentStudio,
        Page::Automations,
        Page::MediaTools,
        Page::Settings,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Dashboard => "/",
            Page::Command => "/command",
            Page::FileBrain => "/file-brain",
            Page::ContentStudio => "/content-studio",
            Page::Automations => "/automations",
            Page::MediaTools => "/media-tools",
            Page::Settings => "/settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Command => "Command Bar",
            Page::FileBrain => "File Brain",
            Page::ContentStudio => "Content Studio",
            Page::Automations => "Automations",
            Page::MediaTools => "Media Tools",
            Page::Settings => "Settings",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Page::Dashboard => "Your intelligent workspace that remembers, understands, and automates. Turn scattered tools into seamless workflows.",
            Page::Command => "A powerful command-line interface to control all your tools and workflows. Type natural commands and let AI understand your intent.",
            Page::FileBrain => "Your AI-powered file memory. Upload once, find forever. Smart organization that learns from how you work.",
            Page::ContentStudio => "AI-powered content creation. Write blog posts, marketing copy, social media content, and more with intelligent assistance.",
            Page::Automations => "Build powerful workflows that run on autopilot. Chain multiple tools together and let AI handle the repetitive work.",
            Page::MediaTools => "Powerful image and video tools. Resize, compress, convert, and enhance your media files with one click.",
            Page::Settings => "Customize your workspace, manage integrations, and configure your productivity preferences.",
        }
    }

    /// Placeholder pages that only render a "coming soon" panel.
    /// Everything but the dashboard, for now.
    pub fn is_coming_soon(&self) -> bool {
        !matches!(self, Page::Dashboard)
    }

    /// Resolve a route. Unknown paths are `None` (not found).
    pub fn from_path(path: &str) -> Option<Page> {
        let normalized = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Page::ALL.into_iter().find(|page| page.path() == normalized)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    pub icon: &'static str,
}

pub const DASHBOARD_STATS: &[StatCard] = &[
    StatCard {
        title: "Files Processed",
        value: "12,847",
        icon: "FileText",
    },
    StatCard {
        title: "Time Saved",
        value: "156h",
        icon: "Clock",
    },
    StatCard {
        title: "Active Users",
        value: "2,543",
        icon: "Users",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Completed,
    Running,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardActivity {
    pub title: &'static str,
    pub description: &'static str,
    pub time: &'static str,
    pub status: ActivityStatus,
}

pub const RECENT_ACTIVITY: &[DashboardActivity] = &[
    DashboardActivity {
        title: "PDF Merged",
        description: "3 documents combined",
        time: "2 min ago",
        status: ActivityStatus::Completed,
    },
    DashboardActivity {
        title: "Images Compressed",
        description: "12 images optimized",
        time: "15 min ago",
        status: ActivityStatus::Completed,
    },
    DashboardActivity {
        title: "Automation Running",
        description: "Daily backup in progress",
        time: "1 hour ago",
        status: ActivityStatus::Running,
    },
    DashboardActivity {
        title: "AI Content Generated",
        description: "Blog post created",
        time: "3 hours ago",
        status: ActivityStatus::Completed,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_resolves_from_its_path() {
        for page in Page::ALL {
            assert_eq!(Page::from_path(page.path()), Some(page));
        }
    }

    #[test]
    fn test_trailing_slash_and_unknown_paths() {
        assert_eq!(Page::from_path("/file-brain/"), Some(Page::FileBrain));
        assert_eq!(Page::from_path(""), Some(Page::Dashboard));
        assert_eq!(Page::from_path("/brand-kit"), None);
    }

    #[test]
    fn test_coming_soon_pages() {
        let placeholders: Vec<_> = Page::ALL.into_iter().filter(|p| p.is_coming_soon()).collect();
        assert_eq!(placeholders.len(), 6);
        assert!(!Page::Dashboard.is_coming_soon());
        assert!(Page::Command.is_coming_soon());
        assert!(Page::FileBrain.is_coming_soon());
    }

    #[test]
    fn test_placeholder_descriptions() {
        assert!(Page::Command
            .description()
            .starts_with("A powerful command-line interface"));
        assert!(Page::FileBrain
            .description()
            .starts_with("Your AI-powered file memory. Upload once, find forever."));
        assert!(Page::Dashboard
            .description()
            .ends_with("Turn scattered tools into seamless workflows."));
    }
}
