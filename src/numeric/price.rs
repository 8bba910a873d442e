// ============================================================================
// Fixed-Point Price
// Prices stored as integer hundredths of a currency unit
// ============================================================================

use super::errors::{NumericError, NumericResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Quantities are whole units of the traded asset.
pub type Quantity = u64;

/// Fixed-point price with two fractional digits.
///
/// Internally stores `value × 100` as an i64, so equality and ordering are exact
/// integer comparisons. This is what the book's price-time ordering is keyed on.
///
/// # Example
/// ```
/// use limit_order_engine::numeric::Price;
///
/// let price: Price = "100.50".parse().unwrap();
/// assert_eq!(price.cents(), 10_050);
/// assert_eq!(price.to_string(), "100.50");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Price(i64);

impl Price {
    /// Number of fractional digits
    pub const DECIMALS: u32 = 2;

    /// The scale factor (10^DECIMALS)
    pub const SCALE: i64 = 100;

    pub const ZERO: Self = Self(0);

    /// One whole currency unit (1.00)
    pub const ONE: Self = Self(Self::SCALE);

    pub const MAX: Self = Self(i64::MAX);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from a raw count of hundredths.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create from a whole number of currency units.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the value does not fit.
    #[inline]
    pub fn from_integer(value: i64) -> NumericResult<Self> {
        value
            .checked_mul(Self::SCALE)
            .map(Self)
            .ok_or(NumericError::out_of_range(value < 0))
    }

    /// Create from integer and fractional (hundredths) parts.
    ///
    /// ```
    /// use limit_order_engine::numeric::Price;
    ///
    /// let p = Price::from_parts(100, 50).unwrap();
    /// assert_eq!(p.to_string(), "100.50");
    /// ```
    pub fn from_parts(integer: i64, fraction: u64) -> NumericResult<Self> {
        if fraction >= Self::SCALE as u64 {
            return Err(NumericError::InvalidInput);
        }

        let int_scaled = integer
            .checked_mul(Self::SCALE)
            .ok_or(NumericError::out_of_range(integer < 0))?;

        let frac_signed = if integer < 0 {
            -(fraction as i64)
        } else {
            fraction as i64
        };

        int_scaled
            .checked_add(frac_signed)
            .map(Self)
            .ok_or(NumericError::out_of_range(integer < 0))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Raw value in hundredths.
    #[inline]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn integer_part(self) -> i64 {
        self.0 / Self::SCALE
    }

    /// Fractional hundredths, always non-negative.
    #[inline]
    pub const fn fractional_part(self) -> u64 {
        (self.0 % Self::SCALE).unsigned_abs()
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.0.checked_add(rhs.0).map(Self).ok_or_else(|| {
            if rhs.0 > 0 {
                NumericError::Overflow
            } else {
                NumericError::Underflow
            }
        })
    }

    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0.checked_sub(rhs.0).map(Self).ok_or_else(|| {
            if rhs.0 < 0 {
                NumericError::Overflow
            } else {
                NumericError::Underflow
            }
        })
    }

    /// Multiply by a unit quantity, e.g. to get the notional value of a fill.
    pub fn checked_mul_quantity(self, quantity: Quantity) -> NumericResult<Self> {
        let qty = i64::try_from(quantity).map_err(|_| NumericError::Overflow)?;
        self.0
            .checked_mul(qty)
            .map(Self)
            .ok_or(NumericError::out_of_range(self.0 < 0))
    }

    // ========================================================================
    // rust_decimal Interop
    // ========================================================================

    /// Convert from `rust_decimal::Decimal`.
    ///
    /// # Errors
    /// - `PrecisionLoss` if the decimal has non-zero digits past the hundredths place
    /// - `Overflow` or `Underflow` if the scaled value does not fit in i64
    pub fn from_decimal(d: Decimal) -> NumericResult<Self> {
        let out_of_range = NumericError::out_of_range(d.is_sign_negative());
        let scaled = d.checked_mul(Decimal::from(Self::SCALE)).ok_or(out_of_range)?;

        if !scaled.fract().is_zero() {
            return Err(NumericError::PrecisionLoss);
        }

        scaled.to_i64().map(Self).ok_or(out_of_range)
    }

    /// Convert to `rust_decimal::Decimal` with scale 2.
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, Self::DECIMALS)
    }
}

// ============================================================================
// Formatting
// ============================================================================

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price({})", self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = Self::SCALE as u64;
        write!(f, "{}{}.{:02}", sign, abs / scale, abs % scale)
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl std::str::FromStr for Price {
    type Err = NumericError;

    /// Parse from a decimal string.
    ///
    /// - "100" -> 100.00
    /// - "99.5" -> 99.50
    /// - "-0.01" -> -0.01
    /// - "1.005" -> `PrecisionLoss`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (is_negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (int_str, frac_str) = match s.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (s, ""),
        };

        if int_str.is_empty() && frac_str.is_empty() {
            return Err(NumericError::InvalidInput);
        }
        if !int_str.bytes().chain(frac_str.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(NumericError::InvalidInput);
        }
        if frac_str.len() > Self::DECIMALS as usize {
            return Err(NumericError::PrecisionLoss);
        }

        let out_of_range = NumericError::out_of_range(is_negative);
        let int_val: i64 = if int_str.is_empty() {
            0
        } else {
            int_str.parse().map_err(|_| out_of_range)?
        };

        let frac_val: u64 = if frac_str.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", frac_str, width = Self::DECIMALS as usize);
            padded.parse().map_err(|_| NumericError::InvalidInput)?
        };

        let magnitude = Self::from_parts(int_val, frac_val).map_err(|err| match err {
            NumericError::Overflow => out_of_range,
            other => other,
        })?;
        if is_negative {
            Ok(Self(-magnitude.0))
        } else {
            Ok(magnitude)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
