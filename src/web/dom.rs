//! Thin typed access to the game page elements.

use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlElement, HtmlImageElement, HtmlInputElement, HtmlOptionElement,
    HtmlSelectElement,
};

use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct Dom {
    document: Document,
}

impl Dom {
    pub fn new() -> Result<Self, ClientError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ClientError::Js("no document available".into()))?;
        Ok(Self { document })
    }

    pub fn from_document(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn element<T: JsCast>(&self, id: &str) -> Result<T, ClientError> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<T>().ok())
            .ok_or_else(|| ClientError::MissingElement(id.to_string()))
    }

    pub fn set_title(&self, title: &str) {
        self.document.set_title(title);
    }

    /// Plain text only; server strings are never parsed as markup
    pub fn set_text(&self, id: &str, text: &str) -> Result<(), ClientError> {
        self.element::<HtmlElement>(id)?.set_text_content(Some(text));
        Ok(())
    }

    pub fn set_display(&self, id: &str, display: &str) -> Result<(), ClientError> {
        self.element::<HtmlElement>(id)?
            .style()
            .set_property("display", display)?;
        Ok(())
    }

    pub fn set_visible(&self, id: &str, visible: bool) -> Result<(), ClientError> {
        self.set_display(id, if visible { "block" } else { "none" })
    }

    /// Card image slot: shown inline with `src`, or hidden
    pub fn set_slot(&self, id: &str, src: Option<&str>) -> Result<(), ClientError> {
        let img = self.element::<HtmlImageElement>(id)?;
        match src {
            Some(src) => {
                img.set_src(src);
                img.style().set_property("display", "inline")?;
            }
            None => img.style().set_property("display", "none")?,
        }
        Ok(())
    }

    /// Replace all options of a `<select>`
    pub fn set_options(&self, id: &str, values: &[u32]) -> Result<(), ClientError> {
        let select = self.element::<HtmlSelectElement>(id)?;
        select.set_inner_html("");
        for value in values {
            let text = value.to_string();
            let option = HtmlOptionElement::new_with_text_and_value(&text, &text)?;
            select.append_child(&option)?;
        }
        Ok(())
    }

    pub fn selected_number(&self, id: &str) -> Result<Option<u32>, ClientError> {
        let select = self.element::<HtmlSelectElement>(id)?;
        Ok(select.value().trim().parse().ok())
    }

    /// Read a text input and clear it
    pub fn take_input(&self, id: &str) -> Result<String, ClientError> {
        let input = self.element::<HtmlInputElement>(id)?;
        let value = input.value();
        input.set_value("");
        Ok(value)
    }

    /// Append a text line to a log container and keep it scrolled down
    pub fn append_line(&self, id: &str, text: &str) -> Result<(), ClientError> {
        let log = self.element::<HtmlElement>(id)?;
        let line = self.document.create_element("div")?;
        line.set_text_content(Some(text));
        log.append_child(&line)?;
        log.set_scroll_top(log.scroll_height());
        Ok(())
    }
}
