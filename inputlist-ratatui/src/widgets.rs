//! Retained terminal views: text fields, the cells holding them, and headers.

use inputlist::{
    ChangeStream, FieldWidget, GridCell, HeaderView, InputGroup, InputItem, InputKind, Rgba,
    ScopeRef,
};

/// Character shown in place of each masked character.
pub const MASK_CHAR: char = '•';

/// An editable single- or multi-line text box.
///
/// Editing is append-only: characters are inserted at the end and removed
/// from the end.
#[derive(Debug)]
pub struct TextField {
    identifier: String,
    label: String,
    required_marker: bool,
    masked: bool,
    multiline: bool,
    text: String,
    changes: ChangeStream<str>,
}

impl TextField {
    /// A field editing `input`, labelled by its placeholder.
    pub fn for_input(input: &dyn InputItem) -> Self {
        let kind = input.kind();
        Self {
            identifier: input.identifier().to_string(),
            label: input
                .placeholder()
                .unwrap_or(input.identifier())
                .to_string(),
            required_marker: input.shows_required_indicator(),
            masked: kind == InputKind::Password,
            multiline: kind == InputKind::Multiline,
            text: String::new(),
            changes: ChangeStream::new(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Label drawn on the field's border, with a trailing `*` when marked required.
    pub fn label(&self) -> String {
        if self.required_marker {
            format!("{}*", self.label)
        } else {
            self.label.clone()
        }
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Text as drawn: masked characters are replaced with [`MASK_CHAR`].
    pub fn display_text(&self) -> String {
        if self.masked {
            self.text.chars().map(|_| MASK_CHAR).collect()
        } else {
            self.text.clone()
        }
    }

    /// Append a character. Newlines are dropped unless the field is multiline.
    pub fn insert_char(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        self.text.push(c);
        self.changes.emit(&self.text);
    }

    /// Remove the last character, if any.
    pub fn backspace(&mut self) {
        if self.text.pop().is_some() {
            self.changes.emit(&self.text);
        }
    }
}

impl FieldWidget for TextField {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.changes.emit(text);
    }

    fn subscribe_text(&self, scope: &ScopeRef, listener: Box<dyn FnMut(&str)>) {
        self.changes.subscribe(scope, listener);
    }
}

/// A row of text fields for one input group.
#[derive(Debug, Default)]
pub struct TerminalCell {
    fields: Vec<TextField>,
}

impl TerminalCell {
    pub fn fields(&self) -> &[TextField] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [TextField] {
        &mut self.fields
    }
}

impl GridCell for TerminalCell {
    fn clear(&mut self) {
        self.fields.clear();
    }

    fn mount(&mut self, group: &InputGroup) {
        self.fields
            .extend(group.items().iter().map(|input| TextField::for_input(input.as_ref())));
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn field(&self, index: usize) -> Option<&dyn FieldWidget> {
        self.fields.get(index).map(|field| field as &dyn FieldWidget)
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn FieldWidget> {
        self.fields
            .get_mut(index)
            .map(|field| field as &mut dyn FieldWidget)
    }
}

/// A single-line section title.
#[derive(Debug, Clone, Default)]
pub struct TerminalHeader {
    title: String,
    title_color: Option<Rgba>,
    background_color: Option<Rgba>,
}

impl TerminalHeader {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn title_color(&self) -> Option<Rgba> {
        self.title_color
    }

    pub fn background_color(&self) -> Option<Rgba> {
        self.background_color
    }
}

impl HeaderView for TerminalHeader {
    fn clear(&mut self) {
        self.title.clear();
        self.title_color = None;
        self.background_color = None;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_title_color(&mut self, color: Rgba) {
        self.title_color = Some(color);
    }

    fn set_background_color(&mut self, color: Rgba) {
        self.background_color = Some(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inputlist::{Scope, TextInput};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn password_fields_are_masked() {
        let input = TextInput::new("password")
            .required()
            .with_kind(InputKind::Password)
            .with_placeholder("Password");
        let mut field = TextField::for_input(&input);
        for c in "abc".chars() {
            field.insert_char(c);
        }

        assert!(field.is_masked());
        assert_eq!(field.text(), "abc");
        assert_eq!(field.display_text(), "•••");
        assert_eq!(field.label(), "Password*");
    }

    #[test]
    fn edits_notify_listeners() {
        let scope = Scope::new();
        let mut field = TextField::for_input(&TextInput::new("name"));
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            field.subscribe_text(
                &scope.handle(),
                Box::new(move |text: &str| seen.borrow_mut().push(text.to_string())),
            );
        }

        field.insert_char('a');
        field.insert_char('b');
        field.backspace();
        field.backspace();
        field.backspace();

        assert_eq!(*seen.borrow(), vec!["a", "ab", "a", ""]);
        assert_eq!(field.label(), "name");
    }

    #[test]
    fn newlines_only_in_multiline_fields() {
        let mut single = TextField::for_input(&TextInput::new("a"));
        single.insert_char('\n');
        assert_eq!(single.text(), "");

        let mut multi =
            TextField::for_input(&TextInput::new("b").with_kind(InputKind::Multiline));
        multi.insert_char('\n');
        assert_eq!(multi.text(), "\n");
    }

    #[test]
    fn header_clear_resets_everything() {
        let mut header = TerminalHeader::default();
        header.set_title("Account");
        header.set_title_color(Rgba::WHITE);
        header.clear();
        assert_eq!(header.title(), "");
        assert_eq!(header.title_color(), None);
    }
}
