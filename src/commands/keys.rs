//! Keys command handler

use anyhow::Result;

use tubekeys::player::render::key_label;
use tubekeys::Config;

/// Print the effective binding table, one key per line.
#[cfg(not(tarpaulin_include))]
pub fn handle() -> Result<()> {
    let config = Config::load()?;
    let suppressed = config.suppress_hook();
    for (key, action) in config.key_bindings().iter() {
        let mark = if suppressed.contains(key) { "*" } else { " " };
        println!(
            "{}{:<8} {:<20} {}",
            mark,
            key_label(key),
            action.to_string(),
            action.describe()
        );
    }
    println!();
    println!("* default handling suppressed");
    Ok(())
}
