//! Message payloads accepted by the logging entry points
//!
//! A payload is one of three shapes:
//! - `Str`: a single string, copied verbatim
//! - `Fmt`: printf-style, built with `format_args!`
//! - `Values`: print-style, a list of [`Arg`]s concatenated in order
//!
//! Verbatim shapes (a plain string, a `format_args!` with no arguments, a
//! single string value) bypass the scratch buffer entirely.

use std::fmt;
use std::io::Write;

/// Marker written when a `Display` implementation reports an error
pub const FORMAT_ERROR_MARKER: &str = "%!(FORMAT ERROR)";

/// One operand of a print-style payload
#[derive(Clone, Copy)]
pub enum Arg<'a> {
    Str(&'a str),
    Int(i64),
    Uint(u64),
    Float32(f32),
    Float(f64),
    Bool(bool),
    Char(char),
    Display(&'a dyn fmt::Display),
}

impl<'a> Arg<'a> {
    /// Wrap any `Display` value
    pub fn display(value: &'a dyn fmt::Display) -> Self {
        Arg::Display(value)
    }

    #[inline]
    pub fn is_str(&self) -> bool {
        matches!(self, Arg::Str(_))
    }
}

impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.write_str(s),
            Arg::Int(i) => write!(f, "{}", i),
            Arg::Uint(u) => write!(f, "{}", u),
            Arg::Float32(fl) => write!(f, "{}", fl),
            Arg::Float(fl) => write!(f, "{}", fl),
            Arg::Bool(b) => write!(f, "{}", b),
            Arg::Char(c) => write!(f, "{}", c),
            Arg::Display(d) => d.fmt(f),
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => write!(f, "Str({:?})", s),
            other => write!(f, "Arg({})", other),
        }
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(s)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(s: &'a String) -> Self {
        Arg::Str(s.as_str())
    }
}

macro_rules! impl_arg_from {
    ($variant:ident: $target:ty => $($t:ty),+) => {
        $(
            impl From<$t> for Arg<'_> {
                fn from(v: $t) -> Self {
                    Arg::$variant(v as $target)
                }
            }
        )+
    };
}

impl_arg_from!(Int: i64 => i8, i16, i32, i64, isize);
impl_arg_from!(Uint: u64 => u8, u16, u32, u64, usize);
impl_arg_from!(Float32: f32 => f32);
impl_arg_from!(Float: f64 => f64);

impl From<bool> for Arg<'_> {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

impl From<char> for Arg<'_> {
    fn from(c: char) -> Self {
        Arg::Char(c)
    }
}

/// The message part of one log call
#[derive(Clone, Copy)]
pub enum Payload<'a> {
    Str(&'a str),
    Fmt(fmt::Arguments<'a>),
    Values(&'a [Arg<'a>]),
}

impl<'a> Payload<'a> {
    /// The message text when it can be copied without rendering
    #[inline]
    pub fn as_verbatim(&self) -> Option<&'a str> {
        match *self {
            Payload::Str(s) => Some(s),
            Payload::Fmt(args) => args.as_str(),
            Payload::Values(&[]) => Some(""),
            Payload::Values(&[Arg::Str(s)]) => Some(s),
            Payload::Values(_) => None,
        }
    }

    /// Render the message into `buf`, appending to whatever is there
    pub fn render_into(&self, buf: &mut Vec<u8>) {
        match *self {
            Payload::Str(s) => buf.extend_from_slice(s.as_bytes()),
            Payload::Fmt(args) => {
                if buf.write_fmt(args).is_err() {
                    buf.extend_from_slice(FORMAT_ERROR_MARKER.as_bytes());
                }
            }
            Payload::Values(values) => render_values(buf, values),
        }
    }
}

/// Print-style concatenation: operands are written back to back, with a
/// space between two neighbours only when neither of them is a string
pub fn render_values(buf: &mut Vec<u8>, values: &[Arg<'_>]) {
    let mut prev_is_str = true;
    for (i, value) in values.iter().enumerate() {
        if i > 0 && !prev_is_str && !value.is_str() {
            buf.push(b' ');
        }
        match value {
            Arg::Str(s) => buf.extend_from_slice(s.as_bytes()),
            other => {
                if write!(buf, "{}", other).is_err() {
                    buf.extend_from_slice(FORMAT_ERROR_MARKER.as_bytes());
                }
            }
        }
        prev_is_str = value.is_str();
    }
}

impl fmt::Debug for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Payload::Fmt(args) => f.debug_tuple("Fmt").field(args).finish(),
            Payload::Values(values) => f.debug_tuple("Values").field(values).finish(),
        }
    }
}

impl<'a> From<&'a str> for Payload<'a> {
    fn from(s: &'a str) -> Self {
        Payload::Str(s)
    }
}

impl<'a> From<&'a String> for Payload<'a> {
    fn from(s: &'a String) -> Self {
        Payload::Str(s.as_str())
    }
}

impl<'a> From<fmt::Arguments<'a>> for Payload<'a> {
    fn from(args: fmt::Arguments<'a>) -> Self {
        Payload::Fmt(args)
    }
}

impl<'a> From<&'a [Arg<'a>]> for Payload<'a> {
    fn from(values: &'a [Arg<'a>]) -> Self {
        Payload::Values(values)
    }
}

impl<'a, const N: usize> From<&'a [Arg<'a>; N]> for Payload<'a> {
    fn from(values: &'a [Arg<'a>; N]) -> Self {
        Payload::Values(values.as_slice())
    }
}

impl<'a> From<&'a Vec<Arg<'a>>> for Payload<'a> {
    fn from(values: &'a Vec<Arg<'a>>) -> Self {
        Payload::Values(values.as_slice())
    }
}
