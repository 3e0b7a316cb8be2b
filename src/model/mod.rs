//! Formatting descriptors shared by elements and containers.
//!
//! Colors, fonts, borders and paragraph formats are plain values. They
//! reference the document head (color and font tables) by index, so every
//! descriptor can register what it needs through `collect_resources` and
//! render its markup against the collected [`Resources`].

mod border;
mod color;
mod font;
mod par_format;
mod resources;

pub use border::{Border, BorderLine, BorderStyle};
pub use color::{Color, ColorTable};
pub use font::{Font, FontTable, DEFAULT_FONT_FAMILY};
pub use par_format::{
    cm_to_twips, pt_to_twips, Alignment, ParFormat, VerticalAlignment, TWIPS_PER_CM, TWIPS_PER_PT,
};
pub use resources::Resources;
