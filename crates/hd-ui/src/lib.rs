//! User interface components for the health dashboard
//!
//! Theme, the shell around the dock area (menu, command sidebar, status
//! bar, notices) and the selector widgets.

pub mod selectors;
pub mod shell;
pub mod theme;

pub use selectors::{patient_selector, variable_selector};
pub use shell::{command_sidebar, menu_bar, show_notices, status_bar, Notice, NoticeLevel, ShellAction, StatusLine};
pub use theme::{apply_theme, Theme};

// Common icon definitions
pub mod icons {
    pub const REFRESH: &str = "🔄";
    pub const FOLDER: &str = "📂";
    pub const DATABASE: &str = "🗄";
    pub const CHECK: &str = "✅";
    pub const WARNING: &str = "⚠";
}
