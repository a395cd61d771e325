//! Console device: textual numeric I/O.
//!
//! The pointer is a format code: 0 reads and prints decimal, 1 hexadecimal.
//! Output carries no separators between calls; input is one whitespace-
//! trimmed line per read.

use crate::device::{Device, DeviceError, DeviceResult};
use std::io::{self, BufRead, Write};

pub struct ConsoleIo {
    reader: Box<dyn BufRead>,
    writer: Box<dyn Write>,
    format: u16,
}

impl ConsoleIo {
    /// Console over the process standard streams.
    pub fn stdio() -> Self {
        Self::with_streams(
            Box::new(io::BufReader::new(io::stdin())),
            Box::new(io::stdout()),
        )
    }

    /// Console over arbitrary streams, for tests and embedders.
    pub fn with_streams(reader: Box<dyn BufRead>, writer: Box<dyn Write>) -> Self {
        Self {
            reader,
            writer,
            format: 0,
        }
    }

    fn hex_format(&self) -> bool {
        self.format & 1 == 1
    }

    fn read_token(&mut self) -> DeviceResult<String> {
        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(line.trim().to_owned())
    }
}

impl Device for ConsoleIo {
    fn write(&mut self, bytes: &[u8]) -> DeviceResult<()> {
        if self.hex_format() {
            for byte in bytes {
                write!(self.writer, "{byte:02x}")?;
            }
        } else {
            write!(self.writer, "{}", decimal_digits(bytes))?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn read(&mut self, n: usize) -> DeviceResult<Vec<u8>> {
        let token = self.read_token()?;
        let parsed = if self.hex_format() {
            let digits = token
                .trim_start_matches("0x")
                .trim_start_matches("0X");
            u128::from_str_radix(digits, 16)
        } else {
            token.parse::<u128>()
        };
        let value = parsed.map_err(|_| DeviceError::Parse { token })?;

        // Exactly n bytes big-endian: zero-extend or keep the low n bytes.
        let be = value.to_be_bytes();
        let mut out = vec![0u8; n];
        let take = n.min(be.len());
        out[n - take..].copy_from_slice(&be[be.len() - take..]);
        Ok(out)
    }

    fn set_pointer(&mut self, value: u16) {
        self.format = value & 1;
    }

    fn get_pointer(&self) -> u16 {
        self.format
    }
}

/// Decimal rendering of a big-endian byte string of any length, via
/// repeated division by 10.
fn decimal_digits(bytes: &[u8]) -> String {
    let mut quotient: Vec<u8> = bytes.iter().copied().skip_while(|&b| b == 0).collect();
    if quotient.is_empty() {
        return "0".to_owned();
    }

    let mut digits = Vec::new();
    while !quotient.is_empty() {
        let mut remainder = 0u32;
        for byte in quotient.iter_mut() {
            let acc = remainder * 256 + u32::from(*byte);
            *byte = (acc / 10) as u8;
            remainder = acc % 10;
        }
        digits.push(b'0' + remainder as u8);
        while quotient.first() == Some(&0) {
            quotient.remove(0);
        }
    }

    digits.iter().rev().map(|&d| char::from(d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    /// Write half of the console that tests can still read afterwards.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn console(input: &str) -> (ConsoleIo, SharedBuf) {
        let out = SharedBuf::default();
        let console = ConsoleIo::with_streams(
            Box::new(Cursor::new(input.as_bytes().to_vec())),
            Box::new(out.clone()),
        );
        (console, out)
    }

    #[test]
    fn test_decimal_write() {
        let (mut console, out) = console("");
        console.write(&[0x00, 0x2A]).unwrap();
        assert_eq!(out.contents(), "42");
    }

    #[test]
    fn test_decimal_write_zero() {
        let (mut console, out) = console("");
        console.write(&[0x00, 0x00]).unwrap();
        assert_eq!(out.contents(), "0");
    }

    #[test]
    fn test_decimal_write_wide_value() {
        let (mut console, out) = console("");
        // 2^128, one byte past what a u128 could render.
        let mut bytes = vec![1u8];
        bytes.extend_from_slice(&[0; 16]);
        console.write(&bytes).unwrap();
        assert_eq!(out.contents(), "340282366920938463463374607431768211456");
    }

    #[test]
    fn test_hex_write() {
        let (mut console, out) = console("");
        console.set_pointer(1);
        console.write(&[0x2A, 0x01]).unwrap();
        assert_eq!(out.contents(), "2a01");
    }

    #[test]
    fn test_writes_carry_no_separator() {
        let (mut console, out) = console("");
        console.write(&[0x07]).unwrap();
        console.write(&[0x08]).unwrap();
        assert_eq!(out.contents(), "78");
    }

    #[test]
    fn test_decimal_read_zero_extends() {
        let (mut console, _) = console("42\n");
        assert_eq!(console.read(2).unwrap(), vec![0x00, 0x2A]);
    }

    #[test]
    fn test_decimal_read_truncates() {
        let (mut console, _) = console("65537\n");
        assert_eq!(console.read(2).unwrap(), vec![0x00, 0x01]);
    }

    #[test]
    fn test_hex_read() {
        let (mut console, _) = console("ff\n0x10\n");
        console.set_pointer(1);
        assert_eq!(console.read(1).unwrap(), vec![0xFF]);
        assert_eq!(console.read(2).unwrap(), vec![0x00, 0x10]);
    }

    #[test]
    fn test_read_wider_than_value() {
        let (mut console, _) = console("1\n");
        let bytes = console.read(20).unwrap();
        assert_eq!(bytes.len(), 20);
        assert_eq!(bytes[19], 1);
        assert!(bytes[..19].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_parse_failure() {
        let (mut console, _) = console("not-a-number\n");
        assert!(matches!(
            console.read(1),
            Err(DeviceError::Parse { token }) if token == "not-a-number"
        ));
    }

    #[test]
    fn test_format_code_masked_to_one_bit() {
        let (mut console, _) = console("");
        console.set_pointer(0xABCD);
        assert_eq!(console.get_pointer(), 1);
        console.set_pointer(2);
        assert_eq!(console.get_pointer(), 0);
    }
}
