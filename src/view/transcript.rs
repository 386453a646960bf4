//! Chat transcript rendering.

use crate::model::{ChatMessage, Role};

use super::markup::render_markup;

const PLACEHOLDER: &str =
    "How can I help you today?\nAsk me about nearby food, shelter, or medical services.";

pub fn render_message(message: &ChatMessage, ansi: bool) -> String {
    let body = render_markup(&message.content, ansi);
    match message.role {
        Role::Assistant => format!("assistant ▸ {}", indent_continuation(&body, 12)),
        Role::User => format!("{body} ◂ you"),
    }
}

fn indent_continuation(body: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    body.lines()
        .enumerate()
        .map(|(i, line)| if i == 0 { line.to_string() } else { format!("{pad}{line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full transcript with pending and error indicators.
pub fn render_transcript(
    messages: &[ChatMessage],
    pending: bool,
    error: Option<&str>,
    ansi: bool,
) -> String {
    let mut out: Vec<String> = if messages.is_empty() {
        vec![PLACEHOLDER.to_string()]
    } else {
        messages.iter().map(|m| render_message(m, ansi)).collect()
    };
    if pending {
        out.push("● ● ●".to_string());
    }
    if let Some(error) = error {
        out.push(format!("! {error}"));
    }
    out.join("\n\n")
}
