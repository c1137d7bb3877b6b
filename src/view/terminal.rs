// src/view/terminal.rs - Document that mirrors visible changes to a text stream
use std::io::Write;

use super::{ids, Display, Document, MemoryDocument};
use crate::render::RenderedMessage;

pub struct TerminalDocument<W: Write> {
    page: MemoryDocument,
    out: W,
}

impl<W: Write> TerminalDocument<W> {
    pub fn new(out: W) -> Self {
        Self {
            page: MemoryDocument::widget_page(),
            out,
        }
    }

    pub fn page(&self) -> &MemoryDocument {
        &self.page
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> Document for TerminalDocument<W> {
    type Handle = usize;

    fn element_by_id(&self, id: &str) -> Option<usize> {
        self.page.element_by_id(id)
    }

    fn set_class(&mut self, element: usize, class: &str) {
        self.page.set_class(element, class);
    }

    fn set_text(&mut self, element: usize, text: &str) {
        self.page.set_text(element, text);
        let id = self.page.id_of(element);
        let line = match id {
            ids::EMAIL_ERROR | ids::PHONE_ERROR if !text.is_empty() => format!("   ✗ {}", text),
            ids::WELCOME_MESSAGE => format!("✅ {}", text),
            ids::SUBMIT_BUTTON => format!("   [{}]", text),
            _ => return,
        };
        self.emit(&line);
    }

    fn value(&self, element: usize) -> String {
        self.page.value(element)
    }

    fn set_value(&mut self, element: usize, value: &str) {
        self.page.set_value(element, value);
    }

    fn set_disabled(&mut self, element: usize, disabled: bool) {
        self.page.set_disabled(element, disabled);
    }

    fn set_display(&mut self, element: usize, display: Display) {
        self.page.set_display(element, display);
        if self.page.id_of(element) == ids::TYPING_INDICATOR && display != Display::None {
            self.emit("◈ …");
        }
    }

    fn set_width_percent(&mut self, element: usize, percent: f64) {
        self.page.set_width_percent(element, percent);
        if self.page.id_of(element) == ids::PROGRESS_BAR {
            self.emit(&format!("   onboarding {:.0}%", percent));
        }
    }

    fn append_message(&mut self, list: usize, message: &RenderedMessage) {
        self.page.append_message(list, message);
        self.emit(&format!("{} {}", message.role.avatar(), message.content));
        if !message.sources.is_empty() {
            let links: Vec<String> = message
                .sources
                .iter()
                .map(|link| format!("{} <{}>", link.label, link.href))
                .collect();
            self.emit(&format!("   📚 Sources: {}", links.join(", ")));
        }
    }

    fn scroll_to_bottom(&mut self, element: usize) {
        self.page.scroll_to_bottom(element);
    }

    fn alert(&mut self, message: &str) {
        self.page.alert(message);
        self.emit(&format!("⚠️  {}", message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_messages_and_alerts_are_printed() {
        let mut document = TerminalDocument::new(Vec::new());
        let list = document.element_by_id(ids::CHAT_MESSAGES).unwrap();
        document.append_message(
            list,
            &RenderedMessage::new(Role::Assistant, "Hello", &["https://example.com/tax".to_string()]),
        );
        document.alert("Connection error. Please try again.");
        let error = document.element_by_id(ids::EMAIL_ERROR).unwrap();
        document.set_text(error, "");

        assert_eq!(document.page().alerts().len(), 1);
        let printed = String::from_utf8(document.into_inner()).unwrap();
        assert_eq!(
            printed,
            "◈ Hello\n   📚 Sources: /tax <https://example.com/tax>\n⚠️  Connection error. Please try again.\n"
        );
    }
}
