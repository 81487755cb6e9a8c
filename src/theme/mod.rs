use gpui::{App, Global, Hsla};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ColorValue {
    White,
    Black,
    Custom(String),
}

impl ColorValue {
    pub fn hex(value: impl Into<String>) -> Self {
        Self::Custom(value.into())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextareaTokens {
    pub bg: ColorValue,
    pub fg: ColorValue,
    pub placeholder: ColorValue,
    pub border: ColorValue,
    pub border_focus: ColorValue,
    pub selection: ColorValue,
    pub caret: ColorValue,
}

impl TextareaTokens {
    pub fn defaults_for(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self {
                bg: ColorValue::White,
                fg: ColorValue::hex("#212529"),
                placeholder: ColorValue::hex("#adb5bd"),
                border: ColorValue::hex("#ced4da"),
                border_focus: ColorValue::hex("#228be6"),
                selection: ColorValue::hex("#228be647"),
                caret: ColorValue::hex("#212529"),
            },
            ColorScheme::Dark => Self {
                bg: ColorValue::hex("#2e2e2e"),
                fg: ColorValue::hex("#f8f9fa"),
                placeholder: ColorValue::hex("#696969"),
                border: ColorValue::hex("#424242"),
                border_focus: ColorValue::hex("#339af0"),
                selection: ColorValue::hex("#339af047"),
                caret: ColorValue::hex("#f8f9fa"),
            },
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Theme {
    pub color_scheme: ColorScheme,
    /// Font family for text surfaces; empty means the window's default.
    pub font_family: String,
    pub textarea: TextareaTokens,
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_scheme(ColorScheme::Light)
    }
}

impl Global for Theme {}

impl Theme {
    pub fn for_scheme(color_scheme: ColorScheme) -> Self {
        Self {
            color_scheme,
            font_family: String::new(),
            textarea: TextareaTokens::defaults_for(color_scheme),
        }
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// The app-wide theme if one was installed with `cx.set_global`, else the default.
    pub fn global_or_default(cx: &App) -> Self {
        cx.try_global::<Theme>().cloned().unwrap_or_default()
    }

    pub fn resolve_color(&self, token: &ColorValue) -> String {
        match token {
            ColorValue::White => "#ffffff".to_string(),
            ColorValue::Black => "#000000".to_string(),
            ColorValue::Custom(value) => value.clone(),
        }
    }

    pub fn resolve_hsla(&self, token: &ColorValue) -> Hsla {
        let raw = self.resolve_color(token);
        gpui::Rgba::try_from(raw.as_str())
            .map(Into::into)
            .unwrap_or_else(|_| gpui::black())
    }
}

/// A theme override carried by one component, falling back to the global theme.
#[derive(Clone, Debug, Default)]
pub struct LocalTheme {
    overridden: Option<Theme>,
    resolved: Theme,
}

impl LocalTheme {
    pub fn set(&mut self, theme: Theme) {
        self.overridden = Some(theme.clone());
        self.resolved = theme;
    }

    pub fn sync_from_provider(&mut self, cx: &App) {
        if self.overridden.is_none() {
            self.resolved = Theme::global_or_default(cx);
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.resolved
    }
}
