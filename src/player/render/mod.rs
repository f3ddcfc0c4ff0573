//! Terminal rendering for the demo player: progress bar, status bar and
//! help overlay.

mod help;
mod progress;
mod status;

pub use help::{
    calc_help_start_col, calc_help_start_row, help_lines, key_label, render_help, HELP_BOX_WIDTH,
};
pub use progress::{build_progress_bar_chars, render_progress_bar};
pub use status::{build_status_text, render_separator_line, render_status_bar, StatusInfo};
