/// pinetools library
///
/// Command palette, simulated workflows and the file brain behind the
/// PineTools dashboard.

pub mod config;
pub mod error;
pub mod filebrain;
pub mod pages;
pub mod palette;

// Re-exports for convenience
pub use config::Settings;
pub use error::{PineError, Result};
pub use filebrain::FileBrain;
pub use palette::CommandBar;
