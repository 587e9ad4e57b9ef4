use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::nucleotide::RnaBase;

/// Thin container of base identities, including cut markers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence {
    bases: Vec<RnaBase>,
}

impl Sequence {
    pub fn new(bases: Vec<RnaBase>) -> Self {
        Self { bases }
    }

    /// Build from numeric base codes.
    pub fn from_codes(codes: &[u8]) -> Self {
        Self::new(codes.iter().map(|&c| RnaBase::from_code(c)).collect())
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Base at `index`; `Undefined` past the end.
    pub fn nt(&self, index: usize) -> RnaBase {
        self.bases.get(index).copied().unwrap_or(RnaBase::Undefined)
    }

    /// Whether `index` holds a strand cut.
    pub fn has_cut(&self, index: usize) -> bool {
        self.nt(index) == RnaBase::Cut
    }

    /// Positions holding a strand cut.
    pub fn cut_points(&self) -> Vec<usize> {
        (0..self.len()).filter(|&i| self.has_cut(i)).collect()
    }

    pub fn bases(&self) -> &[RnaBase] {
        &self.bases
    }
}

impl FromStr for Sequence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| RnaBase::from_char(c, true, true))
            .collect::<Result<Vec<_>>>()
            .map(Sequence::new)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.bases {
            let c = base.to_char(true, true).map_err(|_| fmt::Error)?;
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let seq: Sequence = "GGaa&CcN".parse().unwrap();
        assert_eq!(seq.len(), 8);
        assert_eq!(seq.nt(2), RnaBase::Adenine);
        assert_eq!(seq.nt(7), RnaBase::Undefined);
        assert_eq!(seq.to_string(), "GGAA&CC?");
    }

    #[test]
    fn test_cut_points() {
        let seq: Sequence = "GA+UC-A".parse().unwrap();
        assert_eq!(seq.cut_points(), vec![2, 5]);
        assert!(seq.has_cut(2));
        assert!(!seq.has_cut(3));
        assert!(!seq.has_cut(100));
    }

    #[test]
    fn test_from_codes() {
        let seq = Sequence::from_codes(&[1, 2, 3, 4, 19, 9]);
        assert_eq!(seq.to_string(), "ACGU&?");
    }
}
