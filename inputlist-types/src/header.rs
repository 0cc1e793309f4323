use crate::InputSection;

/// An 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const CLEAR: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const DARK_GRAY: Self = Self::new(85, 85, 85, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Fully transparent.
    pub fn is_clear(&self) -> bool {
        self.a == 0
    }
}

/// Visual decoration of a section header.
///
/// Unset colours resolve to a dark grey title on a clear background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderDecorator {
    pub title_text_color: Option<Rgba>,
    pub background_color: Option<Rgba>,
}

impl HeaderDecorator {
    pub fn with_title_text_color(mut self, color: Rgba) -> Self {
        self.title_text_color = Some(color);
        self
    }

    pub fn with_background_color(mut self, color: Rgba) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn resolved_title_text_color(&self) -> Rgba {
        self.title_text_color.unwrap_or(Rgba::DARK_GRAY)
    }

    pub fn resolved_background_color(&self) -> Rgba {
        self.background_color.unwrap_or(Rgba::CLEAR)
    }
}

/// The supplementary view a renderer shows above a section.
pub trait HeaderView {
    /// Remove everything a previous population added.
    fn clear(&mut self);

    fn set_title(&mut self, title: &str);

    fn set_title_color(&mut self, color: Rgba);

    fn set_background_color(&mut self, color: Rgba);
}

/// Populates a header view for a section.
pub trait HeaderBuilder: Send + Sync {
    fn build_header(&self, section: &InputSection, view: &mut dyn HeaderView);
}

/// Applies a section's decoration to a populated header view.
pub trait HeaderConfig: Send + Sync {
    fn configure_header(&self, decorator: &HeaderDecorator, view: &mut dyn HeaderView);
}

/// Shows the section's header string as the title.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardHeaderBuilder;

impl HeaderBuilder for StandardHeaderBuilder {
    fn build_header(&self, section: &InputSection, view: &mut dyn HeaderView) {
        view.set_title(section.header());
    }
}

/// Applies resolved title and background colours.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardHeaderConfig;

impl HeaderConfig for StandardHeaderConfig {
    fn configure_header(&self, decorator: &HeaderDecorator, view: &mut dyn HeaderView) {
        view.set_background_color(decorator.resolved_background_color());
        view.set_title_color(decorator.resolved_title_text_color());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        title: Option<String>,
        title_color: Option<Rgba>,
        background: Option<Rgba>,
    }

    impl HeaderView for Recorder {
        fn clear(&mut self) {
            *self = Self::default();
        }

        fn set_title(&mut self, title: &str) {
            self.title = Some(title.to_string());
        }

        fn set_title_color(&mut self, color: Rgba) {
            self.title_color = Some(color);
        }

        fn set_background_color(&mut self, color: Rgba) {
            self.background = Some(color);
        }
    }

    #[test]
    fn decorator_defaults() {
        let decorator = HeaderDecorator::default();
        assert_eq!(decorator.resolved_title_text_color(), Rgba::DARK_GRAY);
        assert!(decorator.resolved_background_color().is_clear());
    }

    #[test]
    fn standard_builder_and_config() {
        let section = InputSection::new("personal", "Personal information");
        let decorator = HeaderDecorator::default().with_title_text_color(Rgba::WHITE);
        let mut view = Recorder::default();

        StandardHeaderBuilder.build_header(&section, &mut view);
        StandardHeaderConfig.configure_header(&decorator, &mut view);

        assert_eq!(view.title.as_deref(), Some("Personal information"));
        assert_eq!(view.title_color, Some(Rgba::WHITE));
        assert_eq!(view.background, Some(Rgba::CLEAR));
    }
}
