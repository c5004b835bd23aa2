//! Dashboard views

pub mod result_panel;
pub mod settings;
pub mod vault;

pub use result_panel::render_result_panel;
pub use settings::render_settings_view;
pub use vault::render_vault_view;
