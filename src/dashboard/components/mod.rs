//! Reusable UI components for the dashboard

pub mod notices;
pub mod prompt;
pub mod sidebar;

pub use notices::{render_notices, Notices};
pub use prompt::{render_prompt, PromptKind, PromptOutcome, PromptState};
pub use sidebar::{render_sidebar, SidebarStatus};
