/// In-memory file brain
///
/// Keeps the file list, the activity timeline, the selection and the
/// search/filter/view state. Uploads and links go through short timers so
/// callers can watch the progress fields move. Cloning gives another
/// handle to the same store.

use crate::config::FileBrainSettings;
use crate::error::{PineError, Result};
use crate::filebrain::file_type::{actions_for, FileTypeDetector};
use crate::filebrain::models::{
    FileAction, FileActivity, FileFilter, FileItem, FileStatus, FileType, UploadedFile, ViewMode,
};
use crate::filebrain::seed;
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

/// How many activities the timeline shows
pub const TIMELINE_LIMIT: usize = 10;

#[derive(Debug, Default)]
struct FileBrainState {
    files: Vec<FileItem>,
    activities: Vec<FileActivity>,
    selected_file: Option<String>,
    is_uploading: bool,
    upload_progress: f64,
    search_query: String,
    filter: FileFilter,
    view_mode: ViewMode,
}

#[derive(Clone)]
pub struct FileBrain {
    state: Arc<Mutex<FileBrainState>>,
    detector: Arc<FileTypeDetector>,
    upload_delay: Duration,
    processing_delay: Duration,
    link_delay: Duration,
}

impl Default for FileBrain {
    fn default() -> Self {
        Self::new(&FileBrainSettings::default())
    }
}

impl FileBrain {
    /// Create a store, seeded with the demo library unless disabled
    pub fn new(settings: &FileBrainSettings) -> Self {
        let now = Utc::now();
        let (files, activities) = if settings.seed_demo_data {
            (seed::demo_files(now), seed::demo_activities(now))
        } else {
            (Vec::new(), Vec::new())
        };

        let state = FileBrainState {
            files,
            activities,
            view_mode: settings.default_view_mode,
            ..FileBrainState::default()
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            detector: Arc::new(FileTypeDetector::new()),
            upload_delay: Duration::from_millis(settings.upload_delay_ms),
            processing_delay: Duration::from_millis(settings.processing_delay_ms),
            link_delay: Duration::from_millis(settings.link_delay_ms),
        }
    }

    fn state(&self) -> MutexGuard<'_, FileBrainState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Files passing the current search and type filter
    pub fn files(&self) -> Vec<FileItem> {
        let state = self.state();
        let lower_query = state.search_query.to_lowercase();

        state
            .files
            .iter()
            .filter(|file| file.matches_search(&lower_query) && state.filter.accepts(file.file_type))
            .cloned()
            .collect()
    }

    pub fn all_files(&self) -> Vec<FileItem> {
        self.state().files.clone()
    }

    pub fn get_file(&self, file_id: &str) -> Option<FileItem> {
        self.state().files.iter().find(|f| f.id == file_id).cloned()
    }

    /// Newest first
    pub fn activities(&self) -> Vec<FileActivity> {
        self.state().activities.clone()
    }

    /// The slice of activity the timeline renders
    pub fn timeline(&self) -> Vec<FileActivity> {
        self.state()
            .activities
            .iter()
            .take(TIMELINE_LIMIT)
            .cloned()
            .collect()
    }

    pub fn activities_for(&self, file_id: &str) -> Vec<FileActivity> {
        self.state()
            .activities
            .iter()
            .filter(|a| a.file_id == file_id)
            .cloned()
            .collect()
    }

    pub fn actions_for_file(&self, file_id: &str) -> Result<&'static [FileAction]> {
        self.get_file(file_id)
            .map(|file| actions_for(file.file_type))
            .ok_or_else(|| PineError::FileNotFound(file_id.to_string()))
    }

    pub fn selected_file(&self) -> Option<FileItem> {
        let state = self.state();
        let selected = state.selected_file.as_deref()?;
        state.files.iter().find(|f| f.id == selected).cloned()
    }

    /// Select a file, or clear the selection with `None`
    pub fn select_file(&self, file_id: Option<&str>) -> Result<()> {
        let mut state = self.state();
        match file_id {
            Some(id) if !state.files.iter().any(|f| f.id == id) => {
                Err(PineError::FileNotFound(id.to_string()))
            }
            Some(id) => {
                state.selected_file = Some(id.to_string());
                Ok(())
            }
            None => {
                state.selected_file = None;
                Ok(())
            }
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.state().is_uploading
    }

    /// 0-100
    pub fn upload_progress(&self) -> f64 {
        self.state().upload_progress
    }

    pub fn search_query(&self) -> String {
        self.state().search_query.clone()
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        self.state().search_query = query.into();
    }

    pub fn filter(&self) -> FileFilter {
        self.state().filter
    }

    pub fn set_filter(&self, filter: FileFilter) {
        self.state().filter = filter;
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state().view_mode
    }

    pub fn set_view_mode(&self, mode: ViewMode) {
        self.state().view_mode = mode;
    }

    /// Simulate uploading `uploads`
    ///
    /// Each file takes one upload delay and bumps the progress. After a
    /// processing delay the new records land at the front of the list,
    /// in upload order, marked ready.
    ///
    /// # Returns
    /// * `Ok(Vec<FileItem>)` - the records that were added
    pub async fn upload_files(&self, uploads: Vec<UploadedFile>) -> Result<Vec<FileItem>> {
        {
            let mut state = self.state();
            state.is_uploading = true;
            state.upload_progress = 0.0;
        }

        let total = uploads.len();
        let mut new_files = Vec::with_capacity(total);

        for (index, upload) in uploads.into_iter().enumerate() {
            tokio::time::sleep(self.upload_delay).await;

            let progress = (index + 1) as f64 / total as f64 * 100.0;
            self.state().upload_progress = progress;

            let now = Utc::now();
            let file_type = self.detector.detect(&upload.name);
            tracing::debug!(name = %upload.name, %file_type, progress, "uploaded file");

            new_files.push(FileItem {
                id: Uuid::new_v4().to_string(),
                name: upload.name,
                file_type,
                size: upload.size,
                uploaded_at: now,
                last_used_at: now,
                usage_count: 0,
                thumbnail: None,
                tags: Vec::new(),
                status: FileStatus::Processing,
                context: None,
            });
        }

        tokio::time::sleep(self.processing_delay).await;

        for file in &mut new_files {
            file.status = FileStatus::Ready;
        }

        {
            let mut state = self.state();
            let existing = std::mem::take(&mut state.files);
            state.files = new_files.iter().cloned().chain(existing).collect();
            state.is_uploading = false;
            state.upload_progress = 0.0;
        }

        tracing::info!(count = new_files.len(), "files added to file brain");
        Ok(new_files)
    }

    /// Simulate saving a link
    pub async fn add_link(&self, url: &str) -> Result<FileItem> {
        let url = url.trim();
        if url.is_empty() {
            return Err(PineError::InvalidInput("link is empty".to_string()));
        }

        self.state().is_uploading = true;

        let now = Utc::now();
        let mut link = FileItem {
            id: Uuid::new_v4().to_string(),
            name: url.to_string(),
            file_type: FileType::Link,
            size: 0,
            uploaded_at: now,
            last_used_at: now,
            usage_count: 0,
            thumbnail: None,
            tags: Vec::new(),
            status: FileStatus::Processing,
            context: None,
        };

        tokio::time::sleep(self.link_delay).await;
        link.status = FileStatus::Ready;

        {
            let mut state = self.state();
            state.files.insert(0, link.clone());
            state.is_uploading = false;
        }

        tracing::info!(url = %url, "link added to file brain");
        Ok(link)
    }

    /// Record that `action_id` ran on a file
    ///
    /// Bumps the usage count, refreshes last-used and puts an activity at
    /// the top of the timeline.
    pub fn execute_action(&self, file_id: &str, action_id: &str) -> Result<FileActivity> {
        let mut state = self.state();
        let now = Utc::now();

        let file = state
            .files
            .iter_mut()
            .find(|f| f.id == file_id)
            .ok_or_else(|| PineError::FileNotFound(file_id.to_string()))?;
        file.last_used_at = now;
        file.usage_count += 1;

        let activity = FileActivity {
            id: Uuid::new_v4().to_string(),
            file_id: file_id.to_string(),
            action: format!("Executed {}", action_id),
            timestamp: now,
            result: None,
        };
        state.activities.insert(0, activity.clone());

        tracing::info!(file_id, action_id, "file action executed");
        Ok(activity)
    }

    /// Remove a file, clearing the selection if it pointed at it
    pub fn delete_file(&self, file_id: &str) -> Result<FileItem> {
        let mut state = self.state();

        let position = state
            .files
            .iter()
            .position(|f| f.id == file_id)
            .ok_or_else(|| PineError::FileNotFound(file_id.to_string()))?;
        let removed = state.files.remove(position);

        if state.selected_file.as_deref() == Some(file_id) {
            state.selected_file = None;
        }

        tracing::info!(file_id, name = %removed.name, "file deleted");
        Ok(removed)
    }
}
