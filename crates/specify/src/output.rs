//! Terminal output utilities

use console::{measure_text_width, style, Style};
use indicatif::{ProgressBar, ProgressStyle};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a dimmed hint line
pub fn hint(msg: &str) {
    println!("{}", style(msg).dim());
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Border colour of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
    Accent,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Tone::Info => Style::new().cyan(),
            Tone::Success => Style::new().green(),
            Tone::Warning => Style::new().yellow(),
            Tone::Error => Style::new().red(),
            Tone::Accent => Style::new().magenta(),
        }
    }
}

/// Print a titled box around `lines`
///
/// Error panels go to stderr, everything else to stdout.
pub fn panel(title: &str, tone: Tone, lines: &[String]) {
    let rendered = render_panel(title, tone, lines);
    if tone == Tone::Error {
        eprintln!("\n{}", rendered);
    } else {
        println!("\n{}", rendered);
    }
}

/// Build the panel text; line widths ignore ANSI escapes
pub fn render_panel(title: &str, tone: Tone, lines: &[String]) -> String {
    let border = tone.style();
    let title_width = if title.is_empty() {
        0
    } else {
        measure_text_width(title) + 2
    };
    let content_width = lines
        .iter()
        .map(|l| measure_text_width(l))
        .max()
        .unwrap_or(0)
        .max(title_width + 2);
    // two spaces of padding each side
    let inner = content_width + 4;

    let mut out = Vec::with_capacity(lines.len() + 4);

    let top = if title.is_empty() {
        border.apply_to(format!("╭{}╮", "─".repeat(inner))).to_string()
    } else {
        format!(
            "{}{}{}",
            border.apply_to("╭─ "),
            border.clone().bold().apply_to(title),
            border.apply_to(format!(" {}╮", "─".repeat(inner - title_width - 1)))
        )
    };
    out.push(top);

    let blank = format!("│{}│", " ".repeat(inner));
    out.push(border.apply_to(&blank).to_string());
    for line in lines {
        let pad = content_width - measure_text_width(line);
        out.push(format!(
            "{}  {}{}  {}",
            border.apply_to("│"),
            line,
            " ".repeat(pad),
            border.apply_to("│")
        ));
    }
    out.push(border.apply_to(&blank).to_string());
    out.push(border.apply_to(format!("╰{}╯", "─".repeat(inner))).to_string());

    out.join("\n")
}

/// Highlight a command or path inside panel text
pub fn code(text: &str) -> String {
    style(text).cyan().to_string()
}

/// Dim secondary text inside panel text
pub fn dim(text: &str) -> String {
    style(text).dim().to_string()
}

/// Create a spinner
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

pub(crate) fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> String {
        console::strip_ansi_codes(text).to_string()
    }

    #[test]
    fn test_panel_lines_share_width() {
        let rendered = render_panel(
            "Next Steps",
            Tone::Info,
            &["short".to_string(), format!("with {} inside", code("cd demo"))],
        );
        let widths: Vec<usize> = plain(&rendered)
            .lines()
            .map(|l| l.chars().count())
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{:?}", widths);
        assert!(plain(&rendered).starts_with("╭─ Next Steps "));
    }

    #[test]
    fn test_panel_grows_to_fit_long_title() {
        let rendered = plain(&render_panel("Git Initialization Failed", Tone::Error, &["x".to_string()]));
        let first = rendered.lines().next().unwrap();
        let last = rendered.lines().last().unwrap();
        assert_eq!(first.chars().count(), last.chars().count());
        assert!(first.contains("Git Initialization Failed"));
    }

    #[test]
    fn test_untitled_panel() {
        let rendered = plain(&render_panel("", Tone::Info, &["Project  demo".to_string()]));
        assert!(rendered.starts_with("╭──"));
        assert!(rendered.contains("│  Project  demo  │"));
    }
}
