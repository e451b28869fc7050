pub mod loader;
mod outline;
mod typeface;

pub use loader::{FontLoader, FontSource, DEFAULT_FONT_URL};
pub use outline::shapes_from_paths;
pub use typeface::{parse_outline, GlyphData, Typeface, FALLBACK_GLYPH};
