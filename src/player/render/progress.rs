//! Progress bar rendering for the demo player.
//!
//! Shows the playhead and a tick at the start of every chapter.

use std::io::{self, Write};

use anyhow::Result;

use crate::format::format_duration;
use crate::player::playback::Chapter;

/// Build the progress bar character array.
///
/// # Returns
/// `(bar_chars, filled_count)`; positions before `filled_count` have been
/// played.
pub fn build_progress_bar_chars(
    bar_width: usize,
    current_time: f64,
    duration: f64,
    chapters: &[Chapter],
) -> (Vec<char>, usize) {
    let progress = if duration > 0.0 {
        (current_time / duration).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let filled = (bar_width as f64 * progress) as usize;
    let mut bar: Vec<char> = vec!['─'; bar_width];

    if filled < bar_width {
        bar[filled] = '⏺';
    }

    for chapter in chapters {
        let pos = if duration > 0.0 {
            ((chapter.start_time / duration) * bar_width as f64) as usize
        } else {
            0
        };
        if pos < bar_width && bar[pos] != '⏺' {
            bar[pos] = '◆';
        }
    }

    (bar, filled)
}

/// Render the progress bar with the elapsed / total time on the right.
pub fn render_progress_bar(
    stdout: &mut io::Stdout,
    width: u16,
    row: u16,
    current_time: f64,
    duration: f64,
    chapters: &[Chapter],
) -> Result<()> {
    let time_display = format!(
        " {}/{}",
        format_duration(current_time),
        format_duration(duration)
    );
    let bar_width = (width as usize).saturating_sub(time_display.len() + 2);
    let (bar, filled) = build_progress_bar_chars(bar_width, current_time, duration, chapters);

    const GREEN: &str = "\x1b[32m";
    const YELLOW: &str = "\x1b[33m";
    const WHITE: &str = "\x1b[97m";
    const DARK_GREY: &str = "\x1b[90m";
    const GREY: &str = "\x1b[37m";

    let mut output = String::with_capacity(width as usize * 4);
    output.push_str(&format!("\x1b[{};1H ", row + 1));

    output.push_str(GREEN);
    for (i, &c) in bar.iter().enumerate() {
        if i < filled {
            if c == '◆' {
                output.push_str(YELLOW);
                output.push(c);
                output.push_str(GREEN);
            } else {
                output.push('━');
            }
        } else if i == filled {
            output.push_str(WHITE);
            output.push(c);
        } else if c == '◆' {
            output.push_str(YELLOW);
            output.push(c);
        } else {
            output.push_str(DARK_GREY);
            output.push(c);
        }
    }

    output.push_str(GREY);
    output.push_str(&time_display);
    let used = 1 + bar_width + time_display.len();
    output.push_str(&" ".repeat((width as usize).saturating_sub(used)));
    output.push_str("\x1b[0m");
    write!(stdout, "{}", output)?;

    Ok(())
}
