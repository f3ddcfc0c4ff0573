//! Help overlay for the demo player.
//!
//! The shortcut list is generated from the active binding table so config
//! overrides show up.

use std::io;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::player::input::KeyBindingTable;

/// Inner width of the help box, excluding borders.
const INNER_WIDTH: usize = 43;

/// Width of the help box including borders.
pub const HELP_BOX_WIDTH: usize = INNER_WIDTH + 2;

/// Printable name for a key identifier.
pub fn key_label(key: &str) -> &str {
    match key {
        " " => "Space",
        "ArrowLeft" => "Left",
        "ArrowRight" => "Right",
        "ArrowUp" => "Up",
        "ArrowDown" => "Down",
        other => other,
    }
}

fn boxed(text: &str) -> String {
    let mut line: String = text.chars().take(INNER_WIDTH).collect();
    let pad = INNER_WIDTH.saturating_sub(line.chars().count());
    line.push_str(&" ".repeat(pad));
    format!("║{}║", line)
}

/// Build the help box lines for `bindings`.
pub fn help_lines(bindings: &KeyBindingTable) -> Vec<String> {
    let rule = "═".repeat(INNER_WIDTH);
    let mut lines = vec![
        format!("╔{}╗", rule),
        boxed("           tubekeys player help"),
        format!("╠{}╣", rule),
        boxed(""),
    ];
    for (key, action) in bindings.iter() {
        lines.push(boxed(&format!("  {:<8} {}", key_label(key), action.describe())));
    }
    lines.push(boxed(""));
    lines.push(boxed(&format!("  {:<8} {}", "?", "Show this help")));
    lines.push(boxed(&format!("  {:<8} {}", "q/Esc", "Quit")));
    lines.push(boxed(""));
    lines.push(boxed("         Press any key to close"));
    lines.push(format!("╚{}╝", rule));
    lines
}

/// Row at which a box of `box_height` lines is vertically centered.
pub fn calc_help_start_row(term_height: u16, box_height: usize) -> u16 {
    (term_height.saturating_sub(box_height as u16)) / 2
}

/// Column at which the help box is horizontally centered.
pub fn calc_help_start_col(term_width: u16) -> u16 {
    ((term_width as usize).saturating_sub(HELP_BOX_WIDTH) / 2) as u16
}

/// Clear the screen and draw the centered help box.
pub fn render_help(
    stdout: &mut io::Stdout,
    width: u16,
    height: u16,
    bindings: &KeyBindingTable,
) -> Result<()> {
    let lines = help_lines(bindings);
    let start_row = calc_help_start_row(height, lines.len());
    let col = calc_help_start_col(width);

    execute!(stdout, Clear(ClearType::All))?;

    for (i, line) in lines.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(col, start_row + i as u16),
            SetForegroundColor(Color::Green),
            Print(line),
            ResetColor,
        )?;
    }

    Ok(())
}
