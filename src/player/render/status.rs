//! Status bar rendering for the demo player.

use std::io::{self, Write};

use anyhow::Result;

use crate::player::state::MediaPosition;

/// Everything the status bar shows besides the media position.
#[derive(Debug, Clone, Default)]
pub struct StatusInfo<'a> {
    /// Chapter label at the current time
    pub chapter: Option<&'a str>,
    pub muted: bool,
    pub captions: bool,
    /// Message from the last action, e.g. "no next chapter"
    pub message: Option<&'a str>,
}

/// Build the plain status text shown on the bottom row.
pub fn build_status_text(position: &MediaPosition, info: &StatusInfo<'_>) -> String {
    let mut text = String::with_capacity(96);
    text.push(' ');
    text.push_str(if position.paused { "▶ " } else { "⏸ " });
    text.push_str(&format!(" spd:{}x", position.playback_rate));
    if info.muted {
        text.push_str(" vol:muted");
    } else {
        text.push_str(&format!(" vol:{:.0}%", position.volume * 100.0));
    }
    if info.captions {
        text.push_str(" [CC]");
    }
    if let Some(chapter) = info.chapter {
        text.push_str(&format!(" ◆ {}", chapter));
    }
    if let Some(message) = info.message {
        text.push_str(&format!(" │ {}", message));
    }
    text.push_str(" │ ?:help q:quit");
    text
}

/// Render a separator line.
pub fn render_separator_line(stdout: &mut io::Stdout, width: u16, row: u16) -> Result<()> {
    let mut output = String::with_capacity(width as usize * 3 + 20);
    output.push_str(&format!("\x1b[{};1H\x1b[90m", row + 1));
    output.push_str(&"─".repeat(width as usize));
    output.push_str("\x1b[0m");
    write!(stdout, "{}", output)?;
    Ok(())
}

/// Render the status bar, padded to the full terminal width.
pub fn render_status_bar(
    stdout: &mut io::Stdout,
    width: u16,
    row: u16,
    position: &MediaPosition,
    info: &StatusInfo<'_>,
) -> Result<()> {
    let text = build_status_text(position, info);
    let visible: String = text.chars().take(width as usize).collect();
    let padding = (width as usize).saturating_sub(visible.chars().count());
    write!(
        stdout,
        "\x1b[{};1H\x1b[97m{}{}\x1b[0m",
        row + 1,
        visible,
        " ".repeat(padding)
    )?;
    Ok(())
}
