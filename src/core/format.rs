//! Allocation-free rendering of line headers and archive timestamps
//!
//! Line header layout (the part before the message):
//!
//! ```text
//! 2025-01-08 10:30:45.123456 4242 src/server.rs:88 INF |
//! ```
//!
//! Archive timestamp layout, inserted before the file extension on rotation:
//!
//! ```text
//! 2025-01-08_10-30-45_123456789
//! ```

use super::log_level::LogLevel;
use chrono::{DateTime, Datelike, Local, Timelike};

/// File segment used when caller capture is disabled
pub const UNKNOWN_FILE: &str = "???";

/// Capacity of the stack buffer a line header is rendered into
pub const HEADER_CAPACITY: usize = 256;

/// Destination for rendered bytes
pub trait ByteSink {
    fn put(&mut self, byte: u8);
    fn put_slice(&mut self, bytes: &[u8]);
}

impl ByteSink for Vec<u8> {
    #[inline]
    fn put(&mut self, byte: u8) {
        self.push(byte);
    }

    #[inline]
    fn put_slice(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Fixed-capacity header rendered on the producer's stack
///
/// Bytes past [`HEADER_CAPACITY`] are discarded; only a pathologically long
/// file segment can get there.
pub struct LineHeader {
    bytes: [u8; HEADER_CAPACITY],
    len: usize,
}

impl LineHeader {
    pub fn new() -> Self {
        Self {
            bytes: [0; HEADER_CAPACITY],
            len: 0,
        }
    }

    /// Render the complete header for one line
    pub fn render(
        now: &DateTime<Local>,
        pid: u32,
        file: &str,
        line: u32,
        level: LogLevel,
    ) -> Self {
        let mut header = Self::new();
        append_header(&mut header, now, pid, file, line, level);
        header
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for LineHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSink for LineHeader {
    #[inline]
    fn put(&mut self, byte: u8) {
        if self.len < HEADER_CAPACITY {
            self.bytes[self.len] = byte;
            self.len += 1;
        }
    }

    #[inline]
    fn put_slice(&mut self, bytes: &[u8]) {
        let n = bytes.len().min(HEADER_CAPACITY - self.len);
        self.bytes[self.len..self.len + n].copy_from_slice(&bytes[..n]);
        self.len += n;
    }
}

/// `<timestamp> <pid> <file>:<line> <TAG> | `
pub fn append_header<S: ByteSink>(
    buf: &mut S,
    now: &DateTime<Local>,
    pid: u32,
    file: &str,
    line: u32,
    level: LogLevel,
) {
    append_timestamp(buf, now);
    buf.put(b' ');
    append_int(buf, u64::from(pid));
    buf.put(b' ');
    buf.put_slice(file.as_bytes());
    buf.put(b':');
    append_int(buf, u64::from(line));
    buf.put(b' ');
    buf.put_slice(level.tag().as_bytes());
    buf.put_slice(b" | ");
}

/// `YYYY-MM-DD HH:MM:SS.UUUUUU`
pub fn append_timestamp<S: ByteSink>(buf: &mut S, now: &DateTime<Local>) {
    append_date(buf, now, b'-');
    buf.put(b' ');
    append_int_padded(buf, u64::from(now.hour()), 2);
    buf.put(b':');
    append_int_padded(buf, u64::from(now.minute()), 2);
    buf.put(b':');
    append_int_padded(buf, u64::from(now.second()), 2);
    buf.put(b'.');
    // leap seconds report nanoseconds >= 1e9
    append_int_padded(buf, u64::from(now.nanosecond().min(999_999_999) / 1_000), 6);
}

/// `YYYY-MM-DD_HH-MM-SS_NNNNNNNNN`
pub fn append_rotate_time<S: ByteSink>(buf: &mut S, now: &DateTime<Local>) {
    append_date(buf, now, b'-');
    buf.put(b'_');
    append_int_padded(buf, u64::from(now.hour()), 2);
    buf.put(b'-');
    append_int_padded(buf, u64::from(now.minute()), 2);
    buf.put(b'-');
    append_int_padded(buf, u64::from(now.second()), 2);
    buf.put(b'_');
    append_int_padded(buf, u64::from(now.nanosecond().min(999_999_999)), 9);
}

fn append_date<S: ByteSink>(buf: &mut S, now: &DateTime<Local>, sep: u8) {
    append_int_padded(buf, u64::try_from(now.year()).unwrap_or(0), 4);
    buf.put(sep);
    append_int_padded(buf, u64::from(now.month()), 2);
    buf.put(sep);
    append_int_padded(buf, u64::from(now.day()), 2);
}

/// Decimal rendering without padding
pub fn append_int<S: ByteSink>(buf: &mut S, num: u64) {
    append_int_padded(buf, num, 1);
}

/// Decimal rendering, left-padded with zeros to at least `width` digits
pub fn append_int_padded<S: ByteSink>(buf: &mut S, mut num: u64, width: usize) {
    let mut digits = [0u8; 20];
    let mut start = digits.len();
    loop {
        start -= 1;
        digits[start] = b'0' + (num % 10) as u8;
        num /= 10;
        if num == 0 {
            break;
        }
    }

    for _ in (digits.len() - start)..width {
        buf.put(b'0');
    }
    buf.put_slice(&digits[start..]);
}

/// Position of the `n`-th occurrence of `needle`, counting from the end
pub fn reverse_index(bytes: &[u8], n: usize, needle: u8) -> Option<usize> {
    if n == 0 {
        return None;
    }
    bytes
        .iter()
        .enumerate()
        .rev()
        .filter(|&(_, &b)| b == needle)
        .nth(n - 1)
        .map(|(i, _)| i)
}

/// Split around the `n`-th `sep` from the end
///
/// `reverse_split_n("a/b/c", 1, b'/')` is `("a/b", "c")`,
/// `reverse_split_n("a/b/c", 2, b'/')` is `("a", "b/c")`. Without enough
/// separators the head is empty and the tail is the whole input.
pub fn reverse_split_n(s: &str, n: usize, sep: u8) -> (&str, &str) {
    match reverse_index(s.as_bytes(), n, sep) {
        Some(i) => (&s[..i], &s[i + 1..]),
        None => ("", s),
    }
}

/// Reduce a source path to its last two segments for the header
pub fn short_caller_path(path: &str) -> &str {
    let sep = if path.contains('/') { b'/' } else { b'\\' };
    reverse_split_n(path, 2, sep).1
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 1, 8, 7, 3, 9)
            .earliest()
            .expect("valid datetime")
            + chrono::Duration::nanoseconds(4_056_789)
    }

    fn render<F: FnOnce(&mut Vec<u8>)>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_append_int() {
        assert_eq!(render(|b| append_int(b, 0)), "0");
        assert_eq!(render(|b| append_int(b, 7)), "7");
        assert_eq!(render(|b| append_int(b, 19)), "19");
        assert_eq!(render(|b| append_int(b, 1234)), "1234");
        assert_eq!(render(|b| append_int(b, u64::MAX)), u64::MAX.to_string());
    }

    #[test]
    fn test_append_int_padded() {
        assert_eq!(render(|b| append_int_padded(b, 5, 2)), "05");
        assert_eq!(render(|b| append_int_padded(b, 1234, 9)), "000001234");
        assert_eq!(render(|b| append_int_padded(b, 0, 6)), "000000");
        // wider numbers are never truncated
        assert_eq!(render(|b| append_int_padded(b, 12345, 4)), "12345");
    }

    #[test]
    fn test_append_timestamp() {
        let s = render(|b| append_timestamp(b, &fixed_datetime()));
        assert_eq!(s, "2025-01-08 07:03:09.004056");
    }

    #[test]
    fn test_append_rotate_time() {
        let s = render(|b| append_rotate_time(b, &fixed_datetime()));
        assert_eq!(s, "2025-01-08_07-03-09_004056789");
    }

    #[test]
    fn test_header_layout() {
        let header = LineHeader::render(&fixed_datetime(), 99, "src/test.rs", 666, LogLevel::Error);
        assert_eq!(
            std::str::from_utf8(header.as_bytes()).unwrap(),
            "2025-01-08 07:03:09.004056 99 src/test.rs:666 ERR | "
        );
    }

    #[test]
    fn test_header_truncates_at_capacity() {
        let long = "x".repeat(HEADER_CAPACITY * 2);
        let header = LineHeader::render(&fixed_datetime(), 1, &long, 1, LogLevel::Info);
        assert_eq!(header.len(), HEADER_CAPACITY);
    }

    #[test]
    fn test_reverse_split_n() {
        assert_eq!(reverse_split_n("", 2, b'/'), ("", ""));
        assert_eq!(reverse_split_n("a.rs", 2, b'/'), ("", "a.rs"));
        assert_eq!(reverse_split_n("/a.rs", 2, b'/'), ("", "/a.rs"));
        assert_eq!(reverse_split_n("a/b.rs", 2, b'/'), ("", "a/b.rs"));
        assert_eq!(reverse_split_n("a/b/c.rs", 2, b'/'), ("a", "b/c.rs"));
        assert_eq!(reverse_split_n("a/b/c/d.rs", 2, b'/'), ("a/b", "c/d.rs"));
        assert_eq!(reverse_split_n("a.1.2", 1, b'.'), ("a.1", "2"));
    }

    #[test]
    fn test_short_caller_path() {
        assert_eq!(short_caller_path("/home/me/proj/src/main.rs"), "src/main.rs");
        assert_eq!(short_caller_path("src\\core\\logger.rs"), "core\\logger.rs");
        assert_eq!(short_caller_path("main.rs"), "main.rs");
    }

    #[test]
    fn test_reverse_index() {
        assert_eq!(reverse_index(b"a\nb\nc", 1, b'\n'), Some(3));
        assert_eq!(reverse_index(b"a\nb\nc", 2, b'\n'), Some(1));
        assert_eq!(reverse_index(b"a\nb\nc", 3, b'\n'), None);
        assert_eq!(reverse_index(b"abc", 0, b'b'), None);
    }
}
