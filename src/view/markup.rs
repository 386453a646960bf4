//! Light text markup for assistant replies: bold spans and list items.

use std::sync::LazyLock;

use regex::Regex;

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold regex"));
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[-*+]\s+(.*)$").expect("valid bullet regex"));

const BOLD_ON: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render one message body. With `ansi` off, markers are stripped.
pub fn render_markup(text: &str, ansi: bool) -> String {
    text.lines()
        .map(|line| {
            let line = match BULLET_RE.captures(line) {
                Some(caps) => format!("{}  • {}", &caps[1], &caps[2]),
                None => line.to_string(),
            };
            if ansi {
                BOLD_RE
                    .replace_all(&line, format!("{BOLD_ON}$1{RESET}").as_str())
                    .into_owned()
            } else {
                BOLD_RE.replace_all(&line, "$1").into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
