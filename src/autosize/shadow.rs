use super::surface::{
    BoxSizing, ComputedStyle, Edges, FontSpec, RenderSurface, SurfaceKey, WhiteSpace, WordBreak,
};

/// The style properties that influence wrapping and line metrics. The shadow mirrors
/// these and nothing else.
#[derive(Clone, Debug, PartialEq)]
pub struct MirroredStyle {
    pub width: Option<f32>,
    pub font: FontSpec,
    pub line_height: f32,
    pub padding: Edges,
    pub border: Edges,
    pub box_sizing: BoxSizing,
    pub white_space: WhiteSpace,
    pub word_break: WordBreak,
}

impl MirroredStyle {
    pub fn from_computed(style: &ComputedStyle) -> Self {
        Self {
            width: style.width,
            font: style.font.clone(),
            line_height: style.line_height,
            padding: style.padding,
            border: style.border,
            box_sizing: style.box_sizing,
            white_space: style.white_space,
            word_break: style.word_break,
        }
    }
}

/// How the shadow is kept out of the page: never painted, never hit, never read
/// by assistive technology, and never contributing to layout or scroll extents.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ShadowPresentation {
    pub offscreen: bool,
    pub visibility_hidden: bool,
    pub aria_hidden: bool,
    pub inert: bool,
    pub zero_height: bool,
    pub overflow_hidden: bool,
}

impl ShadowPresentation {
    pub const INERT: Self = Self {
        offscreen: true,
        visibility_hidden: true,
        aria_hidden: true,
        inert: true,
        zero_height: true,
        overflow_hidden: true,
    };
}

#[derive(Clone, Debug)]
pub struct ShadowSurface {
    host: SurfaceKey,
    style: MirroredStyle,
    presentation: ShadowPresentation,
    content: String,
}

impl ShadowSurface {
    fn mirror(host: SurfaceKey, style: &ComputedStyle) -> Self {
        Self {
            host,
            style: MirroredStyle::from_computed(style),
            presentation: ShadowPresentation::INERT,
            content: String::new(),
        }
    }

    /// The visible surface this shadow is a sibling of.
    pub fn host(&self) -> SurfaceKey {
        self.host
    }

    pub fn style(&self) -> &MirroredStyle {
        &self.style
    }

    pub fn presentation(&self) -> ShadowPresentation {
        self.presentation
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Width available to text, or `None` when the mirrored white-space mode does not
    /// wrap or the host has not been laid out yet.
    pub fn wrap_width(&self) -> Option<f32> {
        if !self.style.white_space.wraps() {
            return None;
        }
        let width = self.style.width?;
        let content_width = match self.style.box_sizing {
            BoxSizing::ContentBox => width,
            BoxSizing::BorderBox => {
                width - self.style.padding.horizontal() - self.style.border.horizontal()
            }
        };
        Some(content_width.max(0.0))
    }

    fn set_content(&mut self, text: &str) {
        if self.content != text {
            self.content.clear();
            self.content.push_str(text);
        }
    }
}

/// Owns the offscreen shadow of one widget and measures natural content height with it.
#[derive(Debug, Default)]
pub struct ShadowMeasurer {
    shadow: Option<ShadowSurface>,
    stale: bool,
}

impl ShadowMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shadow for `surface`, creating it on first use.
    pub fn ensure<S: RenderSurface + ?Sized>(&mut self, surface: &S) -> &ShadowSurface {
        self.ensure_mut(surface)
    }

    pub fn shadow(&self) -> Option<&ShadowSurface> {
        self.shadow.as_ref()
    }

    /// Marks the mirrored style stale; the next `ensure` re-mirrors it in place.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Content-only height of `text` as laid out by the shadow.
    pub fn measure<S: RenderSurface + ?Sized>(&mut self, surface: &S, text: &str) -> f32 {
        let shadow = self.ensure_mut(surface);
        shadow.set_content(text);
        let scroll_height = surface.shadow_scroll_height(shadow);
        let content_height =
            (scroll_height - shadow.style.padding.top - shadow.style.padding.bottom).max(0.0);
        log::trace!(
            "shadow of {:016x}: scroll height {scroll_height}, content height {content_height}",
            shadow.host.raw()
        );
        content_height
    }

    fn ensure_mut<S: RenderSurface + ?Sized>(&mut self, surface: &S) -> &mut ShadowSurface {
        let host = surface.surface_key();
        let reuse = self.shadow.as_ref().is_some_and(|shadow| shadow.host == host);
        if !reuse {
            log::debug!("creating measurement shadow for surface {:016x}", host.raw());
            self.shadow = Some(ShadowSurface::mirror(host, &surface.computed_style()));
        } else if self.stale
            && let Some(shadow) = self.shadow.as_mut()
        {
            shadow.style = MirroredStyle::from_computed(&surface.computed_style());
        }
        self.stale = false;

        self.shadow
            .get_or_insert_with(|| ShadowSurface::mirror(host, &surface.computed_style()))
    }
}
