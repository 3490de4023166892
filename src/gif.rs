//! Structural metadata of GIF images.
//!
//! The parser walks the GIF container sequentially: header, logical screen
//! descriptor, then the block stream up to the trailer byte. Pixel data is
//! never decoded; image data sub-blocks are skipped by their length prefixes.
//!
//! Known limitations, kept for compatibility with the tool this parser
//! replaces:
//!
//! * a global color table, when the descriptor announces one, is not skipped
//!   before block traversal begins, so image counts and comments of files
//!   carrying one are unreliable;
//! * sub-blocks of non-comment extensions (graphic control, application,
//!   plain text) are not consumed, so traversal may resynchronize inside
//!   their data.

use std::borrow::Cow;
use std::io::{BufRead, ErrorKind};
use std::str;

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, trace};

use crate::traits::LoadableMetadata;
use crate::types::{Dimensions, Result};
use crate::utils::BufReadExt;

const SEPARATOR_IMAGE: u8 = 0x2c;
const SEPARATOR_EXTENSION: u8 = 0x21;
const SEPARATOR_TRAILER: u8 = 0x3b;
const LABEL_COMMENT: u8 = 0xfe;

/// The fixed seven-byte logical screen descriptor which follows the header.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ScreenDescriptor {
    /// Width of the logical screen in pixels.
    pub width: u16,
    /// Height of the logical screen in pixels.
    pub height: u16,
    /// Number of bits per primary color available to the original image,
    /// between 1 and 8.
    pub color_resolution: u8,
    /// Number of entries in the global color table, if one is announced.
    ///
    /// `None` means the global color table flag is unset; a size is never
    /// computed for a table which is not there.
    pub global_color_table_size: Option<u16>,
    /// Index of the default background color in the global color table.
    pub background_color_index: u8,
}

/// Contains structural metadata about a whole GIF image.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Metadata {
    /// Version string from the file header, e.g. `87a` or `89a`.
    ///
    /// The value is passed through verbatim; unrecognized ASCII versions are
    /// not rejected.
    pub version: String,

    /// Logical screen dimensions of the image.
    pub dimensions: Dimensions,

    /// Number of entries in the global color table, if one is present.
    pub global_color_table_size: Option<u16>,

    /// Number of bits per primary color available to the original image.
    pub color_resolution: u8,

    /// Index of the default background color in the global color table.
    pub background_color_index: u8,

    /// Number of image descriptor blocks found in the stream.
    pub image_count: usize,

    /// Text of each comment extension block, in stream order.
    pub comments: Vec<String>,
}

impl Metadata {
    /// Returns `true` if the image is animated, i.e. has more than one frame.
    #[inline]
    pub fn is_animated(&self) -> bool {
        self.image_count > 1
    }
}

impl LoadableMetadata for Metadata {
    fn load<R: ?Sized + BufRead>(r: &mut R) -> Result<Metadata> {
        let version = read_header(r)?;
        let screen = read_screen_descriptor(r)?;
        let (image_count, comments) = read_blocks(r)?;

        Ok(Metadata {
            version,
            dimensions: (screen.width, screen.height).into(),
            global_color_table_size: screen.global_color_table_size,
            color_resolution: screen.color_resolution,
            background_color_index: screen.background_color_index,
            image_count,
            comments,
        })
    }
}

/// Reads the six-byte header and returns the version string.
fn read_header<R: ?Sized + BufRead>(r: &mut R) -> Result<String> {
    let mut header = [0u8; 6];
    r.read_exact(&mut header)
        .map_err(if_eof!("when reading GIF signature"))?;

    if &header[..3] != b"GIF" {
        return Err(invalid_format!("not a GIF file"));
    }

    ascii_text(&header[3..], || "version string".into())
}

/// Reads the seven bytes of the logical screen descriptor.
///
/// The global color table itself, when announced, is left in the stream.
fn read_screen_descriptor<R: ?Sized + BufRead>(r: &mut R) -> Result<ScreenDescriptor> {
    let width = try_if_eof!(r.read_u16::<LittleEndian>(), "when reading logical width");
    let height = try_if_eof!(r.read_u16::<LittleEndian>(), "when reading logical height");

    let packed_flags = try_if_eof!(r.read_u8(), "when reading global flags");
    let global_color_table = (packed_flags & 0b1000_0000) > 0;
    let color_resolution = ((packed_flags & 0b0111_0000) >> 4) + 1;
    let table_size_exp = packed_flags & 0b0000_0111;

    let background_color_index =
        try_if_eof!(r.read_u8(), "when reading background color index");
    // the pixel aspect ratio byte is present in the stream but not surfaced
    let _ = try_if_eof!(r.read_u8(), "when reading pixel aspect ratio");

    Ok(ScreenDescriptor {
        width,
        height,
        color_resolution,
        global_color_table_size: if global_color_table {
            Some(1u16 << (table_size_exp + 1))
        } else {
            None
        },
        background_color_index,
    })
}

/// Walks the block stream up to the trailer byte, counting image descriptor
/// blocks and collecting comment extension text.
///
/// Running out of input at a separator read ends traversal without error;
/// running out anywhere inside a block is reported as truncation.
fn read_blocks<R: ?Sized + BufRead>(r: &mut R) -> Result<(usize, Vec<String>)> {
    let mut image_count = 0usize;
    let mut comments = Vec::new();

    loop {
        let separator = match r.read_u8() {
            Ok(b) => b,
            Err(ref e) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        };
        match separator {
            SEPARATOR_IMAGE => {
                image_count += 1;
                debug!("image block {}", image_count);
                skip_image(image_count, r)?;
            }
            SEPARATOR_EXTENSION => {
                let label = try_if_eof!(r.read_u8(), "when reading extension label");
                if label == LABEL_COMMENT {
                    let comment = read_comment(comments.len(), r)?;
                    debug!("comment block {}: {} bytes", comments.len(), comment.len());
                    comments.push(comment);
                } else {
                    // sub-blocks of other extensions are left in the stream;
                    // the next separator read resumes inside their data
                    trace!("extension 0x{:02x} left unconsumed", label);
                }
            }
            SEPARATOR_TRAILER => break,
            b => {
                trace!("unknown block type 0x{:02x}, skipping one byte", b);
                r.skip_exact(1)?;
            }
        }
    }

    Ok((image_count, comments))
}

/// Skips an image descriptor block and its compressed data without decoding.
fn skip_image<R: ?Sized + BufRead>(index: usize, r: &mut R) -> Result<()> {
    // left, top, width, height and the first packed byte
    if r.skip_exact(9)? != 9 {
        return Err(unexpected_eof!("when reading descriptor of image block {}", index));
    }

    let table_info = try_if_eof!(
        r.read_u8(),
        "when reading color table info of image block {}", index
    );
    if table_info & 0b1000_0000 > 0 {
        let skip_size = 3 * (1u64 << ((table_info & 0b0000_0111) + 1));
        if r.skip_exact(skip_size)? != skip_size {
            return Err(unexpected_eof!("when reading color table of image block {}", index));
        }
    }

    let _ = try_if_eof!(
        r.read_u8(),
        "when reading LZW minimum code size of image block {}", index
    );
    skip_sub_blocks(r, || format!("when reading image data of image block {}", index).into())
}

/// Skips length-prefixed sub-blocks until the zero-length terminator.
fn skip_sub_blocks<R: ?Sized + BufRead, F>(r: &mut R, on_eof: F) -> Result<()>
where
    F: Fn() -> Cow<'static, str>,
{
    loop {
        let n = try_if_eof!(r.read_u8(), on_eof()) as u64;
        if n == 0 {
            return Ok(());
        }
        trace!("skipping sub-block of {} bytes", n);
        if r.skip_exact(n)? != n {
            return Err(unexpected_eof!(on_eof()));
        }
    }
}

/// Accumulates one comment extension: the concatenation of all sub-block
/// payloads up to the zero-length terminator, decoded as ASCII.
fn read_comment<R: ?Sized + BufRead>(index: usize, r: &mut R) -> Result<String> {
    let mut text = String::new();
    loop {
        let n = try_if_eof!(
            r.read_u8(),
            "when reading sub-block size of comment block {}", index
        ) as usize;
        if n == 0 {
            return Ok(text);
        }
        let mut data = vec![0u8; n];
        r.read_exact(&mut data)
            .map_err(if_eof!("when reading data of comment block {}", index))?;
        text.push_str(&ascii_text(&data, || {
            format!("comment block {}", index).into()
        })?);
    }
}

fn ascii_text<F>(bytes: &[u8], what: F) -> Result<String>
where
    F: Fn() -> Cow<'static, str>,
{
    match str::from_utf8(bytes) {
        Ok(s) if s.is_ascii() => Ok(s.to_owned()),
        _ => Err(encoding_error!("non-ASCII bytes in {}", what())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_version_passes_through() {
        let mut data = &b"GIF89a"[..];
        assert_eq!(read_header(&mut data).unwrap(), "89a");

        // unrecognized versions are not rejected
        let mut data = &b"GIF99z"[..];
        assert_eq!(read_header(&mut data).unwrap(), "99z");
    }

    #[test]
    fn header_rejects_other_signatures() {
        let mut data = &b"PNG89a"[..];
        match read_header(&mut data) {
            Err(crate::Error::InvalidFormat(_)) => {}
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn header_rejects_non_ascii_version() {
        let mut data = &[b'G', b'I', b'F', 0xff, 0xfe, 0xfd][..];
        match read_header(&mut data) {
            Err(crate::Error::Encoding(_)) => {}
            other => panic!("expected Encoding, got {:?}", other),
        }
    }

    #[test]
    fn screen_descriptor_bit_fields() {
        // width 528, height 320, packed 0b10010101
        let mut data = &[0x10, 0x02, 0x40, 0x01, 0b1001_0101, 7, 0][..];
        let screen = read_screen_descriptor(&mut data).unwrap();
        assert_eq!(screen.width, 528);
        assert_eq!(screen.height, 320);
        assert_eq!(screen.color_resolution, 2);
        assert_eq!(screen.global_color_table_size, Some(64));
        assert_eq!(screen.background_color_index, 7);
    }

    #[test]
    fn screen_descriptor_without_table_has_no_size() {
        let mut data = &[0x01, 0x00, 0x01, 0x00, 0b0111_0111, 0, 0][..];
        let screen = read_screen_descriptor(&mut data).unwrap();
        assert_eq!(screen.global_color_table_size, None);
        assert_eq!(screen.color_resolution, 8);
    }

    #[test]
    fn screen_descriptor_truncated() {
        let mut data = &[0x01, 0x00, 0x01][..];
        match read_screen_descriptor(&mut data) {
            Err(crate::Error::UnexpectedEndOfFile(_)) => {}
            other => panic!("expected UnexpectedEndOfFile, got {:?}", other),
        }
    }

    #[test]
    fn unknown_separators_resynchronize_one_byte_at_a_time() {
        // two unknown separators with one junk byte each, then the trailer
        let mut data = &[0x05, 0xaa, 0x07, 0xbb, 0x3b][..];
        let (count, comments) = read_blocks(&mut data).unwrap();
        assert_eq!(count, 0);
        assert!(comments.is_empty());
    }

    #[test]
    fn missing_trailer_ends_traversal() {
        let mut data = &[][..];
        let (count, comments) = read_blocks(&mut data).unwrap();
        assert_eq!(count, 0);
        assert!(comments.is_empty());
    }

    #[test]
    fn non_comment_extension_data_is_left_in_place() {
        // graphic control extension: after the 0xf9 label nothing more is
        // consumed, so its payload is re-read as unknown separators, each
        // eating one extra byte, until the trailer comes up
        let mut data = &[0x21, 0xf9, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x3b][..];
        let (count, comments) = read_blocks(&mut data).unwrap();
        assert_eq!(count, 0);
        assert!(comments.is_empty());
    }

    #[test]
    fn comment_sub_blocks_concatenate() {
        let mut data = &[
            0x21, 0xfe, // comment extension
            0x05, b'h', b'e', b'l', b'l', b'o',
            0x03, b'g', b'i', b'f',
            0x00, // terminator
            0x3b,
        ][..];
        let (count, comments) = read_blocks(&mut data).unwrap();
        assert_eq!(count, 0);
        assert_eq!(comments, vec!["hellogif".to_string()]);
    }

    #[test]
    fn comment_rejects_non_ascii() {
        let mut data = &[0x21, 0xfe, 0x02, 0xc3, 0xa9, 0x00, 0x3b][..];
        match read_blocks(&mut data) {
            Err(crate::Error::Encoding(_)) => {}
            other => panic!("expected Encoding, got {:?}", other),
        }
    }

    #[test]
    fn image_block_with_local_color_table() {
        let mut data = Vec::new();
        data.push(0x2c);
        data.extend_from_slice(&[0u8; 9]); // descriptor fields
        data.push(0b1000_0001); // local table, size exponent 1 -> 4 entries
        data.extend_from_slice(&[0u8; 12]); // 4 * 3 table bytes
        data.push(0x02); // LZW minimum code size
        data.extend_from_slice(&[0x02, 0xaa, 0xbb, 0x00]); // image data
        data.push(0x3b);

        let (count, comments) = read_blocks(&mut &data[..]).unwrap();
        assert_eq!(count, 1);
        assert!(comments.is_empty());
    }

    #[test]
    fn truncated_image_data_is_an_error() {
        let mut data = Vec::new();
        data.push(0x2c);
        data.extend_from_slice(&[0u8; 9]);
        data.push(0x00);
        data.push(0x02);
        data.push(0x10); // announces 16 bytes, but the stream ends

        match read_blocks(&mut &data[..]) {
            Err(crate::Error::UnexpectedEndOfFile(_)) => {}
            other => panic!("expected UnexpectedEndOfFile, got {:?}", other),
        }
    }
}
