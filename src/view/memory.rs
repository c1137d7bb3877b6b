// src/view/memory.rs - Headless document backed by plain structs
use super::{ids, Display, Document};
use crate::render::RenderedMessage;

#[derive(Debug, Clone, Default)]
pub struct MemoryElement {
    pub id: String,
    pub class: String,
    pub text: String,
    pub value: String,
    pub disabled: bool,
    pub display: Option<Display>,
    pub width_percent: Option<f64>,
    pub children: Vec<RenderedMessage>,
    /// Number of children visible when the element was last scrolled to the bottom.
    pub scrolled_to: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Vec<MemoryElement>,
    alerts: Vec<String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements<'a>(element_ids: impl IntoIterator<Item = &'a str>) -> Self {
        let elements = element_ids
            .into_iter()
            .map(|id| MemoryElement {
                id: id.to_string(),
                ..Default::default()
            })
            .collect();
        Self {
            elements,
            alerts: Vec::new(),
        }
    }

    /// All widget elements in their initial page state.
    pub fn widget_page() -> Self {
        let mut document = Self::with_elements(ids::ALL);
        if let Some(submit) = document.element_mut(ids::SUBMIT_BUTTON) {
            submit.text = "Complete Onboarding".to_string();
            submit.disabled = true;
        }
        if let Some(status) = document.element_mut(ids::NAME_STATUS) {
            status.class = "field-status".to_string();
        }
        if let Some(status) = document.element_mut(ids::EMAIL_STATUS) {
            status.class = "field-status".to_string();
        }
        if let Some(status) = document.element_mut(ids::PHONE_STATUS) {
            status.class = "field-status".to_string();
        }
        if let Some(complete) = document.element_mut(ids::ONBOARDING_COMPLETE) {
            complete.display = Some(Display::None);
        }
        if let Some(typing) = document.element_mut(ids::TYPING_INDICATOR) {
            typing.display = Some(Display::None);
        }
        document
    }

    pub fn element(&self, id: &str) -> Option<&MemoryElement> {
        self.elements.iter().find(|element| element.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut MemoryElement> {
        self.elements.iter_mut().find(|element| element.id == id)
    }

    /// Element id behind a handle handed out by `element_by_id`.
    pub fn id_of(&self, handle: usize) -> &str {
        self.elements.get(handle).map(|e| e.id.as_str()).unwrap_or_default()
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    fn get_mut(&mut self, handle: usize) -> Option<&mut MemoryElement> {
        self.elements.get_mut(handle)
    }
}

impl Document for MemoryDocument {
    type Handle = usize;

    fn element_by_id(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|element| element.id == id)
    }

    fn set_class(&mut self, element: usize, class: &str) {
        if let Some(el) = self.get_mut(element) {
            el.class = class.to_string();
        }
    }

    fn set_text(&mut self, element: usize, text: &str) {
        if let Some(el) = self.get_mut(element) {
            el.text = text.to_string();
        }
    }

    fn value(&self, element: usize) -> String {
        self.elements
            .get(element)
            .map(|el| el.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, element: usize, value: &str) {
        if let Some(el) = self.get_mut(element) {
            el.value = value.to_string();
        }
    }

    fn set_disabled(&mut self, element: usize, disabled: bool) {
        if let Some(el) = self.get_mut(element) {
            el.disabled = disabled;
        }
    }

    fn set_display(&mut self, element: usize, display: Display) {
        if let Some(el) = self.get_mut(element) {
            el.display = Some(display);
        }
    }

    fn set_width_percent(&mut self, element: usize, percent: f64) {
        if let Some(el) = self.get_mut(element) {
            el.width_percent = Some(percent);
        }
    }

    fn append_message(&mut self, list: usize, message: &RenderedMessage) {
        if let Some(el) = self.get_mut(list) {
            el.children.push(message.clone());
        }
    }

    fn scroll_to_bottom(&mut self, element: usize) {
        if let Some(el) = self.get_mut(element) {
            el.scrolled_to = el.children.len();
        }
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
