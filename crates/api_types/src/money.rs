use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Signed money amount represented as **integer kuruş**.
///
/// Use this type for all monetary values crossing the API boundary to avoid
/// floating-point drift. The backend serializes amounts as JSON decimal
/// numbers with two fractional digits, so (de)serialization converts through
/// `f64` and rounds at kuruş resolution.
///
/// The value is signed:
/// - positive = inflow / increase
/// - negative = outflow / decrease
///
/// # Examples
///
/// ```rust
/// use api_types::Amount;
///
/// let amount = Amount::new(12_34);
/// assert_eq!(amount.kurus(), 1234);
/// assert_eq!(amount.to_string(), "12,34 TL");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// more than 2 decimals):
///
/// ```rust
/// use api_types::Amount;
///
/// assert_eq!("10".parse::<Amount>().unwrap().kurus(), 1000);
/// assert_eq!("10,5".parse::<Amount>().unwrap().kurus(), 1050);
/// assert!("12.345".parse::<Amount>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Creates a new amount from integer kuruş.
    #[must_use]
    pub const fn new(kurus: i64) -> Self {
        Self(kurus)
    }

    /// Returns the raw value in kuruş.
    #[must_use]
    pub const fn kurus(self) -> i64 {
        self.0
    }

    /// Converts from a major-unit decimal (the wire representation),
    /// rounding to the nearest kuruş.
    #[must_use]
    pub fn from_major(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    /// Converts to a major-unit decimal for the wire.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    /// Plain `1234.56`-style rendering, suitable for an editable input
    /// field. No grouping, `.` as the decimal separator.
    #[must_use]
    pub fn plain(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// Turkish-locale display: grouped thousands with `.`, decimal `,`, and a
/// trailing `TL` (`1.234,56 TL`).
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let lira = abs / 100;
        let kurus = abs % 100;

        let digits = lira.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        write!(f, "{sign}{grouped},{kurus:02} TL")
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseAmountError;

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid amount")
    }
}

impl std::error::Error for ParseAmountError {}

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseAmountError);
        }

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut parts = rest.splitn(2, [',', '.']);
        let whole = parts.next().ok_or(ParseAmountError)?;
        let frac = parts.next().unwrap_or("");

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseAmountError);
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseAmountError);
        }

        let lira: i64 = whole.parse().map_err(|_| ParseAmountError)?;
        let kurus: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| ParseAmountError)? * 10,
            _ => frac.parse().map_err(|_| ParseAmountError)?,
        };

        let total = lira
            .checked_mul(100)
            .and_then(|v| v.checked_add(kurus))
            .ok_or(ParseAmountError)?;

        Ok(Amount(if negative { -total } else { total }))
    }
}

impl From<i64> for Amount {
    fn from(kurus: i64) -> Self {
        Self(kurus)
    }
}

impl From<Amount> for i64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Amount) {
        self.0 -= rhs.0;
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Self::Output {
        Amount(-self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Ok(Amount::from_major(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_numbers() {
        assert_eq!("10".parse::<Amount>().unwrap().kurus(), 1000);
        assert_eq!("0".parse::<Amount>().unwrap().kurus(), 0);
    }

    #[test]
    fn parses_both_decimal_separators() {
        assert_eq!("10.50".parse::<Amount>().unwrap().kurus(), 1050);
        assert_eq!("10,50".parse::<Amount>().unwrap().kurus(), 1050);
        assert_eq!("10,5".parse::<Amount>().unwrap().kurus(), 1050);
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<Amount>().is_err());
        assert!("abc".parse::<Amount>().is_err());
        assert!("12.345".parse::<Amount>().is_err());
        assert!("1,2,3".parse::<Amount>().is_err());
    }

    #[test]
    fn trailing_separator_reads_as_whole_amount() {
        assert_eq!("12.".parse::<Amount>().unwrap(), Amount::new(1200));
    }

    #[test]
    fn parses_negative() {
        assert_eq!("-3,25".parse::<Amount>().unwrap().kurus(), -325);
    }

    #[test]
    fn displays_turkish_grouping() {
        assert_eq!(Amount::new(123_456_78).to_string(), "123.456,78 TL");
        assert_eq!(Amount::new(1_00).to_string(), "1,00 TL");
        assert_eq!(Amount::new(-12_34).to_string(), "-12,34 TL");
    }

    #[test]
    fn plain_is_editable_form() {
        assert_eq!(Amount::new(1250_75).plain(), "1250.75");
        assert_eq!(Amount::new(-50).plain(), "-0.50");
    }

    #[test]
    fn wire_roundtrip_is_exact_at_kurus() {
        let amount: Amount = serde_json::from_str("1000").unwrap();
        assert_eq!(amount.kurus(), 100_000);

        let amount: Amount = serde_json::from_str("400.4").unwrap();
        assert_eq!(amount.kurus(), 40_040);

        let json = serde_json::to_string(&Amount::new(40_040)).unwrap();
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kurus(), 40_040);
    }

    #[test]
    fn settled_epsilon_is_exact_zero() {
        // remaining == 0 within the 0.01 epsilon means zero kuruş.
        let remaining: Amount = serde_json::from_str("0.0").unwrap();
        assert!(remaining.is_zero());
        let remaining: Amount = serde_json::from_str("0.004").unwrap();
        assert!(remaining.is_zero());
    }
}
