pub mod format;
pub mod render;

pub use render::{
    render_alert, render_field_check, render_form, render_history, render_prediction,
    render_submit_state, render_theme,
};

pub fn module_ready() -> bool {
    true
}

pub fn help_text() -> &'static str {
    include_str!("../static/help.txt")
}
