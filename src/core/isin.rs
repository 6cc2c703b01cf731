use serde::{Deserialize, Serialize};
use std::fmt;

/// International Securities Identification Number of a gilt.
///
/// The ISIN is the unique key of a bond record. It is also the key of the
/// exclusion list, so it is kept as an opaque, case-preserving string: the
/// engine never validates the check digit (a malformed identifier is the
/// upstream collaborator's problem).
///
/// # Examples
///
/// ```
/// use gilt_benchmark::core::isin::Isin;
///
/// let a = Isin::new("GB00BMGR2809");
/// let b = Isin::new("GB00BL68HJ26");
/// assert_ne!(a, b);
/// assert_eq!(a.as_str(), "GB00BMGR2809");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Isin(String);

impl Isin {
    /// Create a new ISIN. Surrounding whitespace is trimmed, since the
    /// published gilt tables pad some cells.
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.len() == code.len() {
            Self(code)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Returns the string representation of this ISIN.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Isin {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Isin {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<Isin> for String {
    fn from(isin: Isin) -> Self {
        isin.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isin_equality() {
        let a = Isin::new("GB00BMGR2809");
        let b = Isin::from("GB00BMGR2809");
        let c = Isin::new("GB00BL68HJ26");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_isin_trims_padding() {
        assert_eq!(Isin::new(" GB00BMGR2809 "), Isin::new("GB00BMGR2809"));
    }

    #[test]
    fn test_deserialized_isin_is_trimmed() {
        let isin: Isin = serde_json::from_str(r#"" GB00BMGR2809 ""#).unwrap();
        assert_eq!(isin, Isin::new("GB00BMGR2809"));
        assert_eq!(serde_json::to_string(&isin).unwrap(), r#""GB00BMGR2809""#);
    }

    #[test]
    fn test_isin_display() {
        assert_eq!(format!("{}", Isin::new("GB0004893086")), "GB0004893086");
    }
}
