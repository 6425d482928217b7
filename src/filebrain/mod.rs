/// File brain
///
/// A mock library of uploaded files and links. It remembers what was
/// done with each one. Records only, never contents.

pub mod file_type;
pub mod models;
mod seed;
pub mod store;

pub use file_type::{
    actions_for, detect_file_type, format_file_size, format_time_ago, grouped_actions,
    FileTypeDetector,
};
pub use models::*;
pub use store::FileBrain;
