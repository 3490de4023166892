use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::types::Result;

/// Metadata which can be loaded from a byte stream.
///
/// Loading consumes the stream strictly sequentially, starting at the
/// current position; callers are expected to hand over a stream positioned
/// at offset 0 of the container format.
pub trait LoadableMetadata: Sized {
    fn load<R: ?Sized + BufRead>(r: &mut R) -> Result<Self>;

    #[inline]
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut f = BufReader::new(File::open(path)?);
        LoadableMetadata::load(&mut f)
    }

    #[inline]
    fn load_from_buffer(mut buf: &[u8]) -> Result<Self> {
        LoadableMetadata::load(&mut buf)
    }
}
