//! Number and string formatting onto a [`ByteSink`].
//!
//! [`Printable`] is the single entry point: strings and characters are
//! written as raw bytes, integers go through [`print_number`] and floats
//! through [`print_float`]. Nothing here allocates.

use log::debug;

use crate::traits::ByteSink;

/// Magnitudes above this print as `"ovf"`; the integer part must fit in 32 bits.
pub const FLOAT_OVERFLOW: f64 = 4294967040.0;

/// Decimal digits used when a float is printed without an explicit precision.
pub const DEFAULT_FLOAT_DIGITS: u8 = 2;

/// Enough room for a 64-bit value in base 2.
const DIGIT_BUFFER: usize = 64;

/// Anything that can be rendered onto a byte sink.
pub trait Printable {
    /// Write `self` to `sink`, returning the number of bytes consumed.
    fn print_to<W: ByteSink + ?Sized>(&self, sink: &mut W) -> usize;
}

/// Integer printed in an explicit base (values below 2 mean base 10).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Radix<T>(pub T, pub u8);

/// Float printed with a fixed number of decimal digits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fixed(pub f64, pub u8);

/// Integer types the formatter understands.
pub trait Integer: Copy {
    /// Bit pattern at the type's own width, zero-extended.
    fn bits(self) -> u64;

    /// Magnitude of a negative value; `None` for zero, positives and unsigned types.
    fn negative_magnitude(self) -> Option<u64>;
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl Integer for $t {
            fn bits(self) -> u64 {
                self as u64
            }

            fn negative_magnitude(self) -> Option<u64> {
                None
            }
        }

        impl Printable for $t {
            fn print_to<W: ByteSink + ?Sized>(&self, sink: &mut W) -> usize {
                print_integer(sink, *self, 10)
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($t:ty => $u:ty),*) => {$(
        impl Integer for $t {
            fn bits(self) -> u64 {
                self as $u as u64
            }

            fn negative_magnitude(self) -> Option<u64> {
                (self < 0).then(|| self.unsigned_abs() as u64)
            }
        }

        impl Printable for $t {
            fn print_to<W: ByteSink + ?Sized>(&self, sink: &mut W) -> usize {
                print_integer(sink, *self, 10)
            }
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64, usize);
impl_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, isize => usize);

impl<T: Integer> Printable for Radix<T> {
    fn print_to<W: ByteSink + ?Sized>(&self, sink: &mut W) -> usize {
        print_integer(sink, self.0, self.1)
    }
}

impl Printable for Fixed {
    fn print_to<W: ByteSink + ?Sized>(&self, sink: &mut W) -> usize {
        print_float(sink, self.0, self.1)
    }
}

impl Printable for f64 {
    fn print_to<W: ByteSink + ?Sized>(&self, sink: &mut W) -> usize {
        print_float(sink, *self, DEFAULT_FLOAT_DIGITS)
    }
}

impl Printable for f32 {
    fn print_to<W: ByteSink + ?Sized>(&self, sink: &mut W) -> usize {
        print_float(sink, f64::from(*self), DEFAULT_FLOAT_DIGITS)
    }
}

impl Printable for str {
    fn print_to<W: ByteSink + ?Sized>(&self, sink: &mut W) -> usize {
        sink.write_bytes(self.as_bytes())
    }
}

impl Printable for String {
    fn print_to<W: ByteSink + ?Sized>(&self, sink: &mut W) -> usize {
        self.as_str().print_to(sink)
    }
}

impl Printable for char {
    /// Code points below 256 map straight onto the glyph table; anything
    /// else is written as its UTF-8 bytes.
    fn print_to<W: ByteSink + ?Sized>(&self, sink: &mut W) -> usize {
        match u8::try_from(u32::from(*self)) {
            Ok(byte) => sink.write_byte(byte),
            Err(_) => {
                let mut buf = [0u8; 4];
                sink.write_bytes(self.encode_utf8(&mut buf).as_bytes())
            }
        }
    }
}

impl<T: Printable + ?Sized> Printable for &T {
    fn print_to<W: ByteSink + ?Sized>(&self, sink: &mut W) -> usize {
        (**self).print_to(sink)
    }
}

fn effective_base(base: u8) -> u8 {
    if base < 2 {
        debug!("base {base} coerced to 10");
        10
    } else {
        base
    }
}

/// Print an integer. Negative values get a leading `'-'` in base 10 only;
/// other bases print the two's-complement bit pattern at the value's width.
pub fn print_integer<W: ByteSink + ?Sized, T: Integer>(sink: &mut W, value: T, base: u8) -> usize {
    let base = effective_base(base);
    if base == 10 {
        if let Some(magnitude) = value.negative_magnitude() {
            let n = sink.write_byte(b'-');
            return n + print_number(sink, magnitude, 10);
        }
    }
    print_number(sink, value.bits(), base)
}

/// Print an unsigned value in `base`, most significant digit first.
/// Digits past 9 use `'A'` onward.
pub fn print_number<W: ByteSink + ?Sized>(sink: &mut W, mut n: u64, base: u8) -> usize {
    let base = u64::from(effective_base(base));
    let mut buf = [0u8; DIGIT_BUFFER];
    let mut start = DIGIT_BUFFER;

    loop {
        let digit = (n % base) as u8;
        n /= base;
        start -= 1;
        buf[start] = if digit < 10 {
            b'0' + digit
        } else {
            b'A'.wrapping_add(digit - 10)
        };
        if n == 0 {
            break;
        }
    }

    sink.write_bytes(&buf[start..])
}

/// Print a float with `digits` decimals, rounding half up.
///
/// The rounding offset is added before the integer part is split off, and
/// each decimal is then truncated from the running remainder. Values very
/// close to a .5 boundary can therefore display one unit low
/// (`1.005` → `"1.00"`).
pub fn print_float<W: ByteSink + ?Sized>(sink: &mut W, mut number: f64, digits: u8) -> usize {
    if number.is_nan() {
        return sink.write_bytes(b"nan");
    }
    if number.is_infinite() {
        return sink.write_bytes(b"inf");
    }
    if !(-FLOAT_OVERFLOW..=FLOAT_OVERFLOW).contains(&number) {
        return sink.write_bytes(b"ovf");
    }

    let mut n = 0;
    if number < 0.0 {
        n += sink.write_byte(b'-');
        number = -number;
    }

    let mut rounding = 0.5;
    for _ in 0..digits {
        rounding /= 10.0;
    }
    number += rounding;

    let int_part = number as u64;
    let mut remainder = number - int_part as f64;
    n += print_number(sink, int_part, 10);

    if digits > 0 {
        n += sink.write_byte(b'.');
    }

    for _ in 0..digits {
        remainder *= 10.0;
        let digit = remainder as u64;
        n += print_number(sink, digit, 10);
        remainder -= digit as f64;
    }

    n
}

/// Render any printable value into a byte vector.
pub fn to_bytes<T: Printable + ?Sized>(value: &T) -> Vec<u8> {
    let mut out = Vec::new();
    value.print_to(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text<T: Printable + ?Sized>(value: &T) -> String {
        String::from_utf8(to_bytes(value)).unwrap()
    }

    #[test]
    fn zero_prints_single_digit() {
        assert_eq!(text(&0u32), "0");
        assert_eq!(text(&Radix(0u8, 2)), "0");
    }

    #[test]
    fn hex_uses_capitals() {
        assert_eq!(text(&Radix(0xBEEFu16, 16)), "BEEF");
        assert_eq!(text(&Radix(35u8, 36)), "Z");
    }

    #[test]
    fn negative_decimal_gets_sign() {
        assert_eq!(text(&-42i32), "-42");
        assert_eq!(text(&i64::MIN), "-9223372036854775808");
    }

    #[test]
    fn negative_non_decimal_is_bit_pattern() {
        assert_eq!(text(&Radix(-1i8, 16)), "FF");
        assert_eq!(text(&Radix(-1i32, 16)), "FFFFFFFF");
        assert_eq!(text(&Radix(-2i16, 2)), "1111111111111110");
    }

    #[test]
    fn small_base_coerced_to_decimal() {
        assert_eq!(text(&Radix(255u8, 0)), "255");
        assert_eq!(text(&Radix(-7i32, 1)), "-7");
    }

    #[test]
    fn widest_binary_fits_buffer() {
        assert_eq!(text(&Radix(u64::MAX, 2)), "1".repeat(64));
    }

    #[test]
    fn count_matches_bytes() {
        let mut out: Vec<u8> = Vec::new();
        assert_eq!(print_integer(&mut out, -123i32, 10), 4);
        assert_eq!(print_float(&mut out, 3.5, 1), 3);
        assert_eq!(out, b"-1233.5");
    }

    #[test]
    fn float_rounding_crosses_integer() {
        assert_eq!(text(&Fixed(1.999, 2)), "2.00");
    }

    #[test]
    fn float_sentinels() {
        assert_eq!(text(&Fixed(f64::NAN, 3)), "nan");
        assert_eq!(text(&Fixed(f64::INFINITY, 3)), "inf");
        assert_eq!(text(&Fixed(f64::NEG_INFINITY, 3)), "inf");
        assert_eq!(text(&Fixed(1e10, 2)), "ovf");
        assert_eq!(text(&Fixed(-1e10, 2)), "ovf");
    }

    #[test]
    fn float_default_precision() {
        assert_eq!(text(&2.5f64), "2.50");
        assert_eq!(text(&0.25f32), "0.25");
    }

    #[test]
    fn char_and_str() {
        assert_eq!(to_bytes(&'A'), b"A");
        assert_eq!(to_bytes(&'\u{B0}'), [0xB0]);
        assert_eq!(to_bytes("hi"), b"hi");
    }
}
