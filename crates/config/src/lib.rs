// Configuration loading

pub mod theme;

pub use theme::GridTheme;
