#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Size {
    Xs,
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

/// Geometry of a text field at one [`Size`], in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSizePreset {
    pub font_size: f32,
    pub line_height: f32,
    pub padding_x: f32,
    pub padding_y: f32,
    pub border: f32,
    pub caret_height: f32,
}

impl Size {
    pub const ALL: [Size; 5] = [Size::Xs, Size::Sm, Size::Md, Size::Lg, Size::Xl];

    pub const fn field_preset(self) -> FieldSizePreset {
        match self {
            Size::Xs => FieldSizePreset {
                font_size: 12.0,
                line_height: 14.0,
                padding_x: 8.0,
                padding_y: 5.0,
                border: 1.0,
                caret_height: 13.0,
            },
            Size::Sm => FieldSizePreset {
                font_size: 14.0,
                line_height: 16.0,
                padding_x: 10.0,
                padding_y: 6.0,
                border: 1.0,
                caret_height: 15.0,
            },
            Size::Md => FieldSizePreset {
                font_size: 16.0,
                line_height: 18.0,
                padding_x: 12.0,
                padding_y: 8.0,
                border: 1.0,
                caret_height: 17.0,
            },
            Size::Lg => FieldSizePreset {
                font_size: 18.0,
                line_height: 20.0,
                padding_x: 14.0,
                padding_y: 10.0,
                border: 1.0,
                caret_height: 19.0,
            },
            Size::Xl => FieldSizePreset {
                font_size: 20.0,
                line_height: 22.0,
                padding_x: 16.0,
                padding_y: 12.0,
                border: 1.0,
                caret_height: 21.0,
            },
        }
    }
}
