use crate::style::Size;
use crate::theme::{LocalTheme, Theme};

pub trait Disableable: Sized {
    fn disabled(self, value: bool) -> Self;
}

pub trait Sizeable: Sized {
    fn size(self, value: Size) -> Self;
}

/// Components whose height is driven by a row count between two bounds.
pub trait RowBounded: Sized {
    fn min_rows(self, rows: usize) -> Self;
    fn max_rows(self, rows: usize) -> Self;
    fn unlimited_rows(self) -> Self;
}

pub trait ComponentThemeOverridable: Sized {
    fn local_theme_mut(&mut self) -> &mut LocalTheme;

    fn theme(mut self, theme: Theme) -> Self {
        self.local_theme_mut().set(theme);
        self
    }
}

#[macro_export]
macro_rules! impl_disableable {
    ($type:ty) => {
        impl $crate::contracts::Disableable for $type {
            fn disabled(self, value: bool) -> Self {
                <$type>::disabled(self, value)
            }
        }
    };
}

#[macro_export]
macro_rules! impl_row_bounded {
    ($type:ty) => {
        impl $crate::contracts::RowBounded for $type {
            fn min_rows(self, rows: usize) -> Self {
                <$type>::min_rows(self, rows)
            }

            fn max_rows(self, rows: usize) -> Self {
                <$type>::max_rows(self, rows)
            }

            fn unlimited_rows(self) -> Self {
                <$type>::unlimited_rows(self)
            }
        }
    };
}
