//! Terminal output helpers.
//!
//! Status messages follow one style across commands; listed entries
//! use the classic `key => value {comment}` layout, colored only when
//! asked to.

use console::{style, Color};

use crate::vault::Entry;

/// How listed entries are rendered.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Emit ANSI colors.
    pub style: bool,
    /// Width of the right-aligned key column.
    pub key_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            style: false,
            key_width: 30,
        }
    }
}

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a blue info message to stderr, keeping stdout for data.
pub fn info(msg: &str) {
    eprintln!("{} {}", style("\u{2139}").blue().bold(), msg);
}

fn paint(text: String, color: Color, opts: &RenderOptions) -> String {
    if opts.style {
        style(text)
            .fg(color)
            .bright()
            .force_styling(true)
            .to_string()
    } else {
        text
    }
}

/// Render one entry as `{key:>width} => {value}[ {comment}]`.
///
/// A missing value renders as empty; an empty or missing comment is
/// left out entirely.
pub fn format_entry(key: &str, entry: &Entry, opts: &RenderOptions) -> String {
    let key_col = format!("{key:>width$}", width = opts.key_width);
    let value = entry.value.clone().unwrap_or_default();

    let mut line = format!(
        "{} => {}",
        paint(key_col, Color::Magenta, opts),
        paint(value, Color::Blue, opts)
    );

    if let Some(comment) = entry.comment.as_deref().filter(|c| !c.is_empty()) {
        line.push(' ');
        line.push_str(&paint(format!("{{{comment}}}"), Color::Green, opts));
    }

    line
}

/// Print every entry, one per line.
pub fn print_entries<I>(entries: I, opts: &RenderOptions)
where
    I: IntoIterator<Item = (String, Entry)>,
{
    for (key, entry) in entries {
        println!("{}", format_entry(&key, &entry, opts));
    }
}
