//! Frames rendered lines for the wire.

use bytes::BytesMut;
use thiserror::Error;
use tokio_util::codec::Encoder;

use crate::MAX_LINE_BYTES;

/// Writes each line followed by CRLF, refusing anything that wouldn't fit in a frame.
#[derive(Debug, Clone, Copy)]
pub struct LineCodec {
    max_line_bytes: usize,
}

impl LineCodec {
    #[must_use]
    pub const fn new(max_line_bytes: usize) -> Self {
        Self { max_line_bytes }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new(MAX_LINE_BYTES)
    }
}

impl Encoder<String> for LineCodec {
    type Error = Error;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if line.len() > self.max_line_bytes {
            return Err(Error::LineTooLong {
                len: line.len(),
                max: self.max_line_bytes,
            });
        }

        if line.contains(['\r', '\n']) {
            return Err(Error::EmbeddedLineBreak);
        }

        dst.reserve(line.len() + 2);
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(b"\r\n");

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("line of length {len} exceeds the maximum of {max}")]
    LineTooLong { len: usize, max: usize },
    #[error("line contains an embedded line break")]
    EmbeddedLineBreak,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod test {
    use bytes::BytesMut;
    use tokio_util::codec::Encoder;

    use crate::{
        codec::{Error, LineCodec},
        MAX_FRAME_BYTES, MAX_LINE_BYTES,
    };

    #[test]
    fn appends_crlf() {
        let mut dst = BytesMut::new();
        LineCodec::default()
            .encode(":my.cool.server PONG my.cool.server".to_string(), &mut dst)
            .unwrap();
        assert_eq!(&dst[..], b":my.cool.server PONG my.cool.server\r\n");
    }

    #[test]
    fn full_line_fills_frame() {
        let mut dst = BytesMut::new();
        LineCodec::default()
            .encode("a".repeat(MAX_LINE_BYTES), &mut dst)
            .unwrap();
        assert_eq!(dst.len(), MAX_FRAME_BYTES);
    }

    #[test]
    fn too_long() {
        let mut dst = BytesMut::new();
        let res = LineCodec::default().encode("a".repeat(MAX_LINE_BYTES + 1), &mut dst);
        assert!(
            matches!(res, Err(Error::LineTooLong { len: 511, max: 510 })),
            "{res:?}"
        );
        assert!(dst.is_empty());
    }

    #[test]
    fn embedded_line_break() {
        let mut dst = BytesMut::new();
        let res = LineCodec::default().encode("PRIVMSG #a :hi\r\nQUIT".to_string(), &mut dst);
        assert!(matches!(res, Err(Error::EmbeddedLineBreak)), "{res:?}");
        assert!(dst.is_empty());
    }
}
