use std::fmt::Display;
use std::str::{self, FromStr};

use thiserror::Error;

/// Errors producible while decoding a `[label, accession, name, value]`
/// literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CvParamError {
    #[error("The parameter is missing its opening bracket")]
    MissingOpeningBracket,
    #[error("The parameter is missing its closing bracket")]
    MissingClosingBracket,
}

/// A controlled vocabulary parameter, encoded in mzTab as a bracketed
/// `[label, accession, name, value]` literal. The `name` and `value`
/// segments may legitimately be empty, the brackets may not be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CvParam {
    pub cv_label: String,
    pub accession: String,
    pub name: String,
    pub value: String,
}

impl CvParam {
    pub fn new<L: Into<String>, A: Into<String>, N: Into<String>, V: Into<String>>(
        cv_label: L,
        accession: A,
        name: N,
        value: V,
    ) -> CvParam {
        CvParam {
            cv_label: cv_label.into(),
            accession: accession.into(),
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn coerce<T: str::FromStr>(&self) -> Result<T, T::Err> {
        self.value.parse::<T>()
    }

    pub fn is_controlled(&self) -> bool {
        !self.accession.is_empty()
    }

    pub fn curie(&self) -> Option<&str> {
        if self.is_controlled() {
            Some(self.accession.as_str())
        } else {
            None
        }
    }
}

impl FromStr for CvParam {
    type Err = CvParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.trim();
        let body = body
            .strip_prefix('[')
            .ok_or(CvParamError::MissingOpeningBracket)?;
        let body = body
            .strip_suffix(']')
            .ok_or(CvParamError::MissingClosingBracket)?;

        // At most four segments, so a value may itself contain commas
        let mut segments = body.splitn(4, ',').map(str::trim);
        let cv_label = segments.next().unwrap_or_default();
        let accession = segments.next().unwrap_or_default();
        let name = segments.next().unwrap_or_default();
        let value = segments.next().unwrap_or_default();
        Ok(CvParam::new(cv_label, accession, name, value))
    }
}

impl Display for CvParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.cv_label, self.accession, self.name, self.value
        )
    }
}

/// A [`CvParam`] paired with the sub-index it was declared under, used for
/// multi-valued metadata properties like `sample[n]-species[m]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedParam {
    pub index: u32,
    pub param: CvParam,
}

impl IndexedParam {
    pub fn new(index: u32, param: CvParam) -> Self {
        Self { index, param }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_full() {
        let param: CvParam = "[MS, MS:1001207, Mascot, 2.3]".parse().unwrap();
        assert_eq!(param.cv_label, "MS");
        assert_eq!(param.accession, "MS:1001207");
        assert_eq!(param.name, "Mascot");
        assert_eq!(param.value, "2.3");
        assert!(param.is_controlled());
        assert_eq!(param.curie(), Some("MS:1001207"));
    }

    #[test]
    fn test_parse_empty_value() {
        let param: CvParam = "[MS, MS:1002453, No fixed modifications searched, ]"
            .parse()
            .unwrap();
        assert_eq!(param.name, "No fixed modifications searched");
        assert_eq!(param.value, "");
    }

    #[test]
    fn test_parse_short() {
        let param: CvParam = "[NEWT, 9606]".parse().unwrap();
        assert_eq!(param.cv_label, "NEWT");
        assert_eq!(param.accession, "9606");
        assert_eq!(param.name, "");
        assert_eq!(param.value, "");
    }

    #[test]
    fn test_parse_value_with_commas() {
        let param: CvParam = "[, , custom name, 1, 2, 3]".parse().unwrap();
        assert_eq!(param.name, "custom name");
        assert_eq!(param.value, "1, 2, 3");
        assert!(!param.is_controlled());
        assert_eq!(param.curie(), None);
    }

    #[test]
    fn test_parse_missing_brackets() {
        assert_eq!(
            "MS, MS:1001207, Mascot, 2.3]".parse::<CvParam>(),
            Err(CvParamError::MissingOpeningBracket)
        );
        assert_eq!(
            "[MS, MS:1001207, Mascot, 2.3".parse::<CvParam>(),
            Err(CvParamError::MissingClosingBracket)
        );
    }

    #[test]
    fn test_parse_surrounding_whitespace() {
        let param: CvParam = "  [NEWT, 9606, Homo sapiens (Human), ]  ".parse().unwrap();
        assert_eq!(param.name, "Homo sapiens (Human)");
    }

    #[test]
    fn test_coerce() {
        let param: CvParam = "[MS, MS:1001171, Mascot:score, 30.8]".parse().unwrap();
        let score: f64 = param.coerce().unwrap();
        assert!((score - 30.8).abs() < 1e-6);
    }

    #[test]
    fn test_display_round_trip() {
        let text = "[MS, MS:1001207, Mascot, 2.3]";
        let param: CvParam = text.parse().unwrap();
        assert_eq!(param.to_string(), text);
    }
}
