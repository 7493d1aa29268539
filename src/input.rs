//! Parsing and validation of user-entered demands, sheets and kerf.
//!
//! The packer trusts its input, so everything reaching it goes through here
//! first: dimensions must be finite and positive, quantities non-zero, kerf
//! finite and non-negative.

use thiserror::Error;

use crate::types::{Demand, Rect, Sheet};

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("invalid {what} '{input}', expected {expected}")]
    Format {
        what: &'static str,
        input: String,
        expected: &'static str,
    },
    #[error("invalid number '{0}'")]
    Number(String),
    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },
    #[error("quantity must be non-zero in '{0}'")]
    ZeroQuantity(String),
    #[error("kerf must be a non-negative number, got {0}")]
    Kerf(f64),
}

pub type Result<T> = std::result::Result<T, InputError>;

fn parse_number(s: &str) -> Result<f64> {
    let s = s.trim();
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(InputError::Number(s.to_string())),
    }
}

fn positive(what: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InputError::NonPositive { what, value })
    }
}

/// A single positive length such as `600` or `18.5`.
pub fn parse_dimension(s: &str) -> Result<f64> {
    positive("dimension", parse_number(s)?)
}

fn split_dims(s: &str) -> Vec<&str> {
    s.split(['x', 'X']).collect()
}

/// `WxH`, e.g. `600x400`.
pub fn parse_rect(s: &str) -> Result<Rect> {
    let parts = split_dims(s);
    if parts.len() != 2 {
        return Err(InputError::Format {
            what: "dimensions",
            input: s.to_string(),
            expected: "WxH",
        });
    }
    Ok(Rect::new(
        positive("width", parse_number(parts[0])?)?,
        positive("height", parse_number(parts[1])?)?,
    ))
}

/// `WxH:qty`, e.g. `600x400:3`.
pub fn parse_cut(s: &str) -> Result<Demand> {
    let Some((dims, qty)) = s.split_once(':') else {
        return Err(InputError::Format {
            what: "cut",
            input: s.to_string(),
            expected: "WxH:qty",
        });
    };
    let rect = parse_rect(dims)?;
    let qty = qty
        .trim()
        .parse::<u32>()
        .map_err(|_| InputError::Number(qty.trim().to_string()))?;
    if qty == 0 {
        return Err(InputError::ZeroQuantity(s.to_string()));
    }
    Ok(Demand { rect, qty })
}

/// `WxHxT`, e.g. `2440x1220x18`. Thickness is required but only carried along.
pub fn parse_sheet(s: &str) -> Result<Sheet> {
    let parts = split_dims(s);
    if parts.len() != 3 {
        return Err(InputError::Format {
            what: "sheet",
            input: s.to_string(),
            expected: "WxHxT",
        });
    }
    Ok(Sheet::new(
        positive("width", parse_number(parts[0])?)?,
        positive("height", parse_number(parts[1])?)?,
        positive("thickness", parse_number(parts[2])?)?,
    ))
}

pub fn parse_kerf(s: &str) -> Result<f64> {
    validate_kerf(parse_number(s)?)
}

pub fn validate_kerf(kerf: f64) -> Result<f64> {
    if kerf.is_finite() && kerf >= 0.0 {
        Ok(kerf)
    } else {
        Err(InputError::Kerf(kerf))
    }
}

impl Demand {
    pub fn validate(&self) -> Result<()> {
        positive("width", self.rect.w)?;
        positive("height", self.rect.h)?;
        if self.qty == 0 {
            return Err(InputError::ZeroQuantity(self.rect.to_string()));
        }
        Ok(())
    }
}

impl Sheet {
    pub fn validate(&self) -> Result<()> {
        positive("width", self.rect.w)?;
        positive("height", self.rect.h)?;
        positive("thickness", self.thickness)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("600"), Ok(600.0));
        assert_eq!(parse_dimension(" 18.5 "), Ok(18.5));
        assert!(matches!(
            parse_dimension("0"),
            Err(InputError::NonPositive { what: "dimension", .. })
        ));
        assert!(matches!(
            parse_dimension("-3"),
            Err(InputError::NonPositive { what: "dimension", .. })
        ));
        assert!(matches!(parse_dimension("abc"), Err(InputError::Number(_))));
        assert!(matches!(parse_dimension("NaN"), Err(InputError::Number(_))));
    }

    #[test]
    fn test_parse_cut() {
        assert_eq!(parse_cut("600x400:3"), Ok(Demand::new(600.0, 400.0, 3)));
        assert_eq!(parse_cut(" 12.5X30 : 1 "), Ok(Demand::new(12.5, 30.0, 1)));
    }

    #[test]
    fn test_parse_cut_rejects_bad_input() {
        assert!(matches!(parse_cut("600x400"), Err(InputError::Format { .. })));
        assert!(matches!(parse_cut("600:3"), Err(InputError::Format { .. })));
        assert!(matches!(parse_cut("600xabc:3"), Err(InputError::Number(_))));
        assert!(matches!(parse_cut("600x400:1.5"), Err(InputError::Number(_))));
        assert!(matches!(parse_cut("600x400:-1"), Err(InputError::Number(_))));
        assert!(matches!(parse_cut("600x400:0"), Err(InputError::ZeroQuantity(_))));
        assert!(matches!(
            parse_cut("0x400:2"),
            Err(InputError::NonPositive { what: "width", .. })
        ));
        assert!(matches!(
            parse_cut("600x-4:2"),
            Err(InputError::NonPositive { what: "height", .. })
        ));
        assert!(matches!(parse_cut("infx4:2"), Err(InputError::Number(_))));
    }

    #[test]
    fn test_parse_sheet() {
        assert_eq!(parse_sheet("2440x1220x18"), Ok(Sheet::new(2440.0, 1220.0, 18.0)));
        assert!(matches!(parse_sheet("2440x1220"), Err(InputError::Format { .. })));
        assert!(matches!(
            parse_sheet("2440x1220x0"),
            Err(InputError::NonPositive { what: "thickness", .. })
        ));
        assert!(matches!(parse_sheet("2440x1220x"), Err(InputError::Number(_))));
    }

    #[test]
    fn test_parse_kerf() {
        assert_eq!(parse_kerf("3"), Ok(3.0));
        assert_eq!(parse_kerf("0"), Ok(0.0));
        assert_eq!(parse_kerf("2.5"), Ok(2.5));
        assert!(matches!(parse_kerf("-1"), Err(InputError::Kerf(_))));
        assert!(matches!(parse_kerf(""), Err(InputError::Number(_))));
        assert!(validate_kerf(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_numeric_input() {
        assert!(Demand::new(10.0, 10.0, 1).validate().is_ok());
        assert!(Demand::new(10.0, 10.0, 0).validate().is_err());
        assert!(Demand::new(-10.0, 10.0, 2).validate().is_err());
        assert!(Sheet::new(100.0, 100.0, 18.0).validate().is_ok());
        assert!(Sheet::new(100.0, f64::INFINITY, 18.0).validate().is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = parse_cut("600x400").unwrap_err();
        assert_eq!(err.to_string(), "invalid cut '600x400', expected WxH:qty");
        let err = parse_sheet("2440x0x18").unwrap_err();
        assert_eq!(err.to_string(), "height must be positive, got 0");
    }
}
