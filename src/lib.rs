//! gifmeta extracts structural metadata from GIF files by reading the
//! container format directly: signature and version, logical screen
//! descriptor fields, image block count and comment extension text. Pixel
//! data is skipped, never decoded.
//!
//! ```no_run
//! use gifmeta::FileMetadata;
//!
//! # fn main() -> gifmeta::Result<()> {
//! let md = FileMetadata::load_from_file("picture.gif")?;
//! println!("{} frames, version {}", md.gif.image_count, md.gif.version);
//! for (name, value) in md.fields() {
//!     println!("{}: {}", name, value);
//! }
//! # Ok(())
//! # }
//! ```

pub use crate::report::FileMetadata;
pub use crate::traits::LoadableMetadata;
pub use crate::types::{Dimensions, Error, Result};

#[macro_use]
mod macros;
mod traits;
mod types;
mod utils;

pub mod gif;
pub mod report;
pub mod sidecar;
