/// Generic trait for parsing little-endian binary payloads
pub trait BinaryParser {
    fn buffer(&self) -> &[u8];
    fn cursor(&self) -> usize;
    fn cursor_mut(&mut self) -> &mut usize;

    fn next(&mut self) -> anyhow::Result<u8> {
        let b = self.buffer().get(self.cursor()).copied();
        if b.is_some() {
            *self.cursor_mut() += 1;
        }
        b.ok_or(anyhow::anyhow!("unexpected eof"))
    }

    fn remaining(&self) -> usize {
        self.buffer().len().saturating_sub(self.cursor())
    }

    fn parse_u8(&mut self) -> anyhow::Result<u8> {
        self.next()
    }

    fn parse_u16(&mut self) -> anyhow::Result<u16> {
        let b1 = self.next()?;
        let b2 = self.next()?;

        Ok(u16::from_le_bytes([b1, b2]))
    }

    fn parse_i16(&mut self) -> anyhow::Result<i16> {
        let b1 = self.next()?;
        let b2 = self.next()?;

        Ok(i16::from_le_bytes([b1, b2]))
    }

    fn parse_u32(&mut self) -> anyhow::Result<u32> {
        let b1 = self.next()?;
        let b2 = self.next()?;
        let b3 = self.next()?;
        let b4 = self.next()?;

        Ok(u32::from_le_bytes([b1, b2, b3, b4]))
    }

    /// Reads a null-terminated string without scanning past the end of the
    /// buffer. A missing terminator yields the rest of the buffer.
    fn parse_cstr(&mut self) -> String {
        let rest = &self.buffer()[self.cursor().min(self.buffer().len())..];
        let (bytes, consumed) = match rest.iter().position(|&b| b == b'\0') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        let s = String::from_utf8_lossy(bytes).into_owned();

        *self.cursor_mut() += consumed;

        s
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct SliceParser<'a> {
        buffer: &'a [u8],
        cursor: usize,
    }

    impl BinaryParser for SliceParser<'_> {
        fn buffer(&self) -> &[u8] {
            self.buffer
        }

        fn cursor(&self) -> usize {
            self.cursor
        }

        fn cursor_mut(&mut self) -> &mut usize {
            &mut self.cursor
        }
    }

    #[test]
    fn integers_are_little_endian() {
        let mut parser = SliceParser {
            buffer: &[0x34, 0x12, 0xfe, 0xff, 0x78, 0x56, 0x34, 0x12],
            cursor: 0,
        };

        assert_eq!(parser.parse_u16().unwrap(), 0x1234);
        assert_eq!(parser.parse_i16().unwrap(), -2);
        assert_eq!(parser.parse_u32().unwrap(), 0x1234_5678);
        assert!(parser.next().is_err());
    }

    #[test]
    fn cstr_stops_at_terminator() {
        let mut parser = SliceParser {
            buffer: b"a.png\0b.png\0",
            cursor: 0,
        };

        assert_eq!(parser.parse_cstr(), "a.png");
        assert_eq!(parser.parse_cstr(), "b.png");
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn cstr_without_terminator_is_bounded() {
        let mut parser = SliceParser {
            buffer: b"Arial",
            cursor: 0,
        };

        assert_eq!(parser.parse_cstr(), "Arial");
        assert_eq!(parser.remaining(), 0);
        assert_eq!(parser.parse_cstr(), "");
    }
}
