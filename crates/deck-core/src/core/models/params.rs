use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single directive argument, classified by what it parses as.
///
/// Integers are tried first, then floats, and anything else is kept as a word.
/// Only tokens that look numeric (leading digit, sign or dot) are considered
/// for the numeric variants, and only finite values become floats, so `nan`,
/// `-nan` or `+inf` stay words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    Int(i64),
    Float(f64),
    Word(String),
}

impl Param {
    pub fn classify(token: &str) -> Self {
        if looks_numeric(token) {
            if let Ok(i) = token.parse::<i64>() {
                return Self::Int(i);
            }
            if let Some(f) = token.parse::<f64>().ok().filter(|f| f.is_finite()) {
                return Self::Float(f);
            }
        }
        Self::Word(token.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Word(_) => None,
        }
    }

    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Word(w) => Some(w),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Word(_))
    }
}

fn looks_numeric(token: &str) -> bool {
    matches!(
        token.chars().next(),
        Some('0'..='9') | Some('-') | Some('+') | Some('.')
    )
}

/// Formats a float so that it is read back as a float, never as an integer.
pub fn format_float(value: f64) -> String {
    // Debug keeps a trailing `.0` on integral values and switches to
    // exponent notation for very large or small magnitudes.
    format!("{:?}", value)
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => f.write_str(&format_float(*x)),
            Self::Word(w) => f.write_str(w),
        }
    }
}

/// An atom/bond/angle type selector used by the `*_coeff` directives.
///
/// Mirrors the engine's wildcard syntax: `*`, `n`, `n*`, `*n` and `m*n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRange {
    All,
    Single(u32),
    Span { lo: Option<u32>, hi: Option<u32> },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid type selector '{0}'")]
pub struct ParseTypeRangeError(pub String);

impl FromStr for TypeRange {
    type Err = ParseTypeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTypeRangeError(s.to_string());
        let parse_bound = |part: &str| -> Result<Option<u32>, ParseTypeRangeError> {
            if part.is_empty() {
                return Ok(None);
            }
            match part.parse::<u32>() {
                Ok(0) | Err(_) => Err(err()),
                Ok(n) => Ok(Some(n)),
            }
        };

        if s == "*" {
            return Ok(Self::All);
        }
        match s.split_once('*') {
            None => match parse_bound(s)? {
                Some(n) => Ok(Self::Single(n)),
                None => Err(err()),
            },
            Some((lo, hi)) => {
                if hi.contains('*') {
                    return Err(err());
                }
                let (lo, hi) = (parse_bound(lo)?, parse_bound(hi)?);
                if let (Some(l), Some(h)) = (lo, hi) {
                    if l > h {
                        return Err(err());
                    }
                }
                Ok(Self::Span { lo, hi })
            }
        }
    }
}

impl TryFrom<String> for TypeRange {
    type Error = ParseTypeRangeError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeRange> for String {
    fn from(value: TypeRange) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TypeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("*"),
            Self::Single(n) => write!(f, "{}", n),
            Self::Span { lo, hi } => {
                if let Some(lo) = lo {
                    write!(f, "{}", lo)?;
                }
                f.write_str("*")?;
                if let Some(hi) = hi {
                    write!(f, "{}", hi)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_distinguishes_ints_floats_and_words() {
        assert_eq!(Param::classify("32345"), Param::Int(32345));
        assert_eq!(Param::classify("-2"), Param::Int(-2));
        assert_eq!(Param::classify("0.00025"), Param::Float(0.00025));
        assert_eq!(Param::classify("1e-4"), Param::Float(1e-4));
        assert_eq!(Param::classify(".5"), Param::Float(0.5));
        assert_eq!(
            Param::classify("lammps_ice"),
            Param::Word("lammps_ice".to_string())
        );
    }

    #[test]
    fn classify_keeps_non_numeric_looking_floats_as_words() {
        assert_eq!(Param::classify("inf"), Param::Word("inf".to_string()));
        assert_eq!(Param::classify("nan"), Param::Word("nan".to_string()));
        assert_eq!(
            Param::classify("127.0.0.1"),
            Param::Word("127.0.0.1".to_string())
        );
    }

    #[test]
    fn signed_non_finite_tokens_stay_words() {
        for token in ["-nan", "+nan", "+inf", "-inf", "-infinity", "+Infinity"] {
            assert_eq!(Param::classify(token), Param::Word(token.to_string()), "{}", token);
        }
        assert_eq!(Param::classify("1e999"), Param::Word("1e999".to_string()));
    }

    #[test]
    fn float_display_is_reclassified_as_float() {
        for value in [2.0, 0.00025, 17.007, 1e-8, 1e20, -3.5] {
            let text = Param::Float(value).to_string();
            assert_eq!(Param::classify(&text), Param::Float(value), "{}", text);
        }
    }

    #[test]
    fn as_f64_widens_integers() {
        assert_eq!(Param::Int(3).as_f64(), Some(3.0));
        assert_eq!(Param::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(Param::Word("x".into()).as_f64(), None);
    }

    #[test]
    fn type_range_parses_all_selector_forms() {
        assert_eq!("*".parse(), Ok(TypeRange::All));
        assert_eq!("2".parse(), Ok(TypeRange::Single(2)));
        assert_eq!(
            "2*".parse(),
            Ok(TypeRange::Span {
                lo: Some(2),
                hi: None
            })
        );
        assert_eq!(
            "*3".parse(),
            Ok(TypeRange::Span {
                lo: None,
                hi: Some(3)
            })
        );
        assert_eq!(
            "1*3".parse(),
            Ok(TypeRange::Span {
                lo: Some(1),
                hi: Some(3)
            })
        );
    }

    #[test]
    fn type_range_rejects_malformed_selectors() {
        for bad in ["", "0", "a", "3*1", "1**", "1*2*3", "-1"] {
            assert!(bad.parse::<TypeRange>().is_err(), "{}", bad);
        }
    }

    #[test]
    fn type_range_display_matches_source_text() {
        for text in ["*", "4", "2*", "*3", "1*3"] {
            let range: TypeRange = text.parse().unwrap();
            assert_eq!(range.to_string(), text);
        }
    }
}
