//! Integer coercion for filter magnitudes.
//!
//! Magnitudes usually arrive as counts computed elsewhere, but fixtures and
//! query layers hand them over as strings, floats or loosely typed JSON. Every
//! input is reduced to an `i64` with integer-cast rules: a leading numeric
//! prefix for strings, truncation toward zero for floats, `0`/`1` for booleans.

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Conversion of an "integer-like" input into a filter magnitude.
pub trait IntoMagnitude {
    /// Coerce `self` into an `i64`, never failing.
    fn into_magnitude(self) -> i64;
}

macro_rules! lossless_magnitude {
    ($($ty:ty),*) => {
        $(
            impl IntoMagnitude for $ty {
                fn into_magnitude(self) -> i64 {
                    i64::from(self)
                }
            }
        )*
    };
}

macro_rules! unsigned_magnitude {
    ($($ty:ty),*) => {
        $(
            impl IntoMagnitude for $ty {
                fn into_magnitude(self) -> i64 {
                    i64::try_from(self).unwrap_or(i64::MAX)
                }
            }
        )*
    };
}

macro_rules! signed_magnitude {
    ($($ty:ty),*) => {
        $(
            impl IntoMagnitude for $ty {
                fn into_magnitude(self) -> i64 {
                    i64::try_from(self).unwrap_or(if self.is_negative() {
                        i64::MIN
                    } else {
                        i64::MAX
                    })
                }
            }
        )*
    };
}

lossless_magnitude!(i8, i16, i32, i64, u8, u16, u32, bool);
unsigned_magnitude!(u64, u128, usize);
signed_magnitude!(i128, isize);

impl IntoMagnitude for f64 {
    fn into_magnitude(self) -> i64 {
        if self.is_finite() {
            // `as` saturates at the i64 bounds.
            self.trunc() as i64
        } else {
            0
        }
    }
}

impl IntoMagnitude for f32 {
    fn into_magnitude(self) -> i64 {
        f64::from(self).into_magnitude()
    }
}

impl IntoMagnitude for &str {
    fn into_magnitude(self) -> i64 {
        leading_number(self)
    }
}

impl IntoMagnitude for String {
    fn into_magnitude(self) -> i64 {
        leading_number(&self)
    }
}

impl IntoMagnitude for &String {
    fn into_magnitude(self) -> i64 {
        leading_number(self)
    }
}

impl IntoMagnitude for &Number {
    fn into_magnitude(self) -> i64 {
        if let Some(int) = self.as_i64() {
            int
        } else if let Some(unsigned) = self.as_u64() {
            unsigned.into_magnitude()
        } else {
            self.as_f64().map_or(0, IntoMagnitude::into_magnitude)
        }
    }
}

impl IntoMagnitude for &Value {
    fn into_magnitude(self) -> i64 {
        match self {
            Value::Null => 0,
            Value::Bool(flag) => i64::from(*flag),
            Value::Number(number) => number.into_magnitude(),
            Value::String(text) => leading_number(text),
            Value::Array(items) => i64::from(!items.is_empty()),
            Value::Object(_) => 1,
        }
    }
}

impl IntoMagnitude for Value {
    fn into_magnitude(self) -> i64 {
        (&self).into_magnitude()
    }
}

/// Deserialize any JSON-compatible value and coerce it into a magnitude.
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(raw.into_magnitude())
}

/// Read the longest numeric prefix of `text`, ignoring leading whitespace.
///
/// Returns `0` when the text does not start with a number.
fn leading_number(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    end = skip_digits(bytes, end);
    let int_digits = end - int_start;

    let mut is_float = false;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, end + 1);
        frac_digits = frac_end - (end + 1);
        if int_digits > 0 || frac_digits > 0 {
            is_float = true;
            end = frac_end;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = skip_digits(bytes, exp);
        if exp_end > exp {
            is_float = true;
            end = exp_end;
        }
    }

    let number = &trimmed[..end];
    if is_float {
        number
            .parse::<f64>()
            .map_or(0, IntoMagnitude::into_magnitude)
    } else {
        // Only overflow can fail here, the prefix is all digits.
        number.parse::<i64>().unwrap_or(if number.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        })
    }
}

fn skip_digits(bytes: &[u8], mut index: usize) -> usize {
    while bytes.get(index).is_some_and(u8::is_ascii_digit) {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_pass_through() {
        assert_eq!(5_i32.into_magnitude(), 5);
        assert_eq!((-7_i64).into_magnitude(), -7);
        assert_eq!(42_usize.into_magnitude(), 42);
    }

    #[test]
    fn wide_integers_saturate() {
        assert_eq!(u64::MAX.into_magnitude(), i64::MAX);
        assert_eq!(i128::MIN.into_magnitude(), i64::MIN);
    }

    #[test]
    fn floats_truncate_toward_zero() {
        assert_eq!(3.9_f64.into_magnitude(), 3);
        assert_eq!((-3.9_f64).into_magnitude(), -3);
        assert_eq!(2.5_f32.into_magnitude(), 2);
        assert_eq!(f64::NAN.into_magnitude(), 0);
        assert_eq!(f64::INFINITY.into_magnitude(), 0);
        assert_eq!(1e30_f64.into_magnitude(), i64::MAX);
    }

    #[test]
    fn booleans_become_zero_or_one() {
        assert_eq!(true.into_magnitude(), 1);
        assert_eq!(false.into_magnitude(), 0);
    }

    #[test]
    fn strings_use_leading_number() {
        assert_eq!("5".into_magnitude(), 5);
        assert_eq!(" 12abc".into_magnitude(), 12);
        assert_eq!("-4".into_magnitude(), -4);
        assert_eq!("+8".into_magnitude(), 8);
        assert_eq!("3.9".into_magnitude(), 3);
        assert_eq!(".5".into_magnitude(), 0);
        assert_eq!("7.".into_magnitude(), 7);
        assert_eq!("1e3".into_magnitude(), 1000);
        assert_eq!("2E-1".into_magnitude(), 0);
        assert_eq!("4e".into_magnitude(), 4);
        assert_eq!("abc".into_magnitude(), 0);
        assert_eq!("".into_magnitude(), 0);
        assert_eq!("-".into_magnitude(), 0);
        assert_eq!("99999999999999999999".into_magnitude(), i64::MAX);
        assert_eq!(String::from("15 items").into_magnitude(), 15);
    }

    #[test]
    fn json_values_follow_cast_rules() {
        assert_eq!(json!(null).into_magnitude(), 0);
        assert_eq!(json!(9).into_magnitude(), 9);
        assert_eq!(json!(9.99).into_magnitude(), 9);
        assert_eq!(json!(u64::MAX).into_magnitude(), i64::MAX);
        assert_eq!(json!("21").into_magnitude(), 21);
        assert_eq!(json!(true).into_magnitude(), 1);
        assert_eq!(json!([]).into_magnitude(), 0);
        assert_eq!(json!([0]).into_magnitude(), 1);
        assert_eq!(json!({"a": 1}).into_magnitude(), 1);
    }
}
