// Formatter layout based on pretty_env_logger v0.4.0, trimmed down for a single target.

use env_logger::{
    fmt::{Color, Style, StyledValue},
    Builder, Env,
};
use log::Level;

/// Width of the `timestamp level` prefix, used to indent continuation lines.
// 24 (timestamp) + 1 space + 5 (level)
const PREFIX_WIDTH: usize = 30;

pub fn init(level: &str) {
    let env = Env::default().filter_or("RUST_LOG", level);

    Builder::from_env(env)
        .format(|buf, record| {
            use std::io::Write;

            let mut style = buf.style();
            let level = colored_level(&mut style, record.level());
            let time = buf.timestamp_millis();

            let text = record.args().to_string();
            let mut lines = text.lines();

            writeln!(buf, "{time} {level} > {}", lines.next().unwrap_or_default())?;

            for line in lines {
                writeln!(buf, "{:PREFIX_WIDTH$}   {line}", "")?;
            }

            Ok(())
        })
        .init();
}

/// Maps the verbosity flags onto the default `RUST_LOG` filter.
pub const fn level_filter(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "warn";
    }

    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn colored_level(style: &'_ mut Style, level: Level) -> StyledValue<'_, &'static str> {
    match level {
        Level::Trace => style.set_color(Color::Magenta).value("TRACE"),
        Level::Debug => style.set_color(Color::Blue).value("DEBUG"),
        Level::Info => style.set_color(Color::Green).value("INFO "),
        Level::Warn => style.set_color(Color::Yellow).value("WARN "),
        Level::Error => style.set_color(Color::Red).value("ERROR"),
    }
}

#[cfg(test)]
mod tests {
    use super::level_filter;

    #[test]
    fn verbosity_flags() {
        assert_eq!(level_filter(0, false), "info");
        assert_eq!(level_filter(1, false), "debug");
        assert_eq!(level_filter(4, false), "trace");
        assert_eq!(level_filter(2, true), "warn");
    }
}
