use std::io::{self, BufRead, ErrorKind};

pub trait BufReadExt: BufRead {
    /// Skips up to `n` bytes, returning the number actually skipped.
    ///
    /// A return value smaller than `n` means the stream ended early.
    fn skip_exact(&mut self, n: u64) -> io::Result<u64> {
        let mut skipped = 0;
        loop {
            let available = match self.fill_buf() {
                Ok(buf) => buf.len(),
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            } as u64;
            let total = skipped + available;
            if total >= n {
                let to_skip = available - (total - n);
                self.consume(to_skip as usize);
                return Ok(skipped + to_skip);
            }
            self.consume(available as usize);
            skipped += available;
            if available == 0 {
                return Ok(skipped);
            }
        }
    }
}

impl<R: BufRead + ?Sized> BufReadExt for R {}

#[cfg(test)]
mod tests {
    use super::BufReadExt;

    #[test]
    fn skip_within_stream() {
        let mut data = &[1u8, 2, 3, 4, 5][..];
        assert_eq!(data.skip_exact(3).unwrap(), 3);
        assert_eq!(data, &[4, 5]);
    }

    #[test]
    fn skip_past_end_reports_shortfall() {
        let mut data = &[1u8, 2][..];
        assert_eq!(data.skip_exact(5).unwrap(), 2);
        assert!(data.is_empty());
    }
}
