use crate::error::{Error, Result};

/// Base identities that can appear in a sequence: `?ACGU&`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RnaBase {
    Undefined = 0,
    Adenine = 1,
    Cytosine = 2,
    Guanine = 3,
    Uracil = 4,
    /// Strand break between two molecules.
    Cut = 19,
}

/// Characters read as a strand cut.
pub const CUT_MARKERS: [char; 3] = ['&', '-', '+'];

/// Pair type matrix, rows and columns ordered `_ A C G U X K I`.
///
/// Nonzero entries are canonical or wobble pairs, plus the synthetic
/// X-K and inosine pairs.
#[rustfmt::skip]
const PAIR_TYPE_MAT: [u8; 64] = [
    /* _  A  C  G  U  X  K  I */
       1, 0, 0, 0, 0, 0, 0, 0, // _
       0, 0, 0, 0, 5, 0, 0, 5, // A
       0, 0, 0, 1, 0, 0, 0, 0, // C
       0, 0, 2, 0, 3, 0, 0, 0, // G
       0, 6, 0, 4, 0, 0, 0, 6, // U
       0, 0, 0, 0, 0, 0, 2, 0, // X
       0, 0, 0, 0, 0, 1, 0, 0, // K
       0, 6, 0, 0, 5, 0, 0, 0, // I
];

impl RnaBase {
    /// Numeric code of this base.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a numeric code; anything unrecognized is `Undefined`.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => RnaBase::Adenine,
            2 => RnaBase::Cytosine,
            3 => RnaBase::Guanine,
            4 => RnaBase::Uracil,
            19 => RnaBase::Cut,
            _ => RnaBase::Undefined,
        }
    }

    /// Convert a character to a base.
    ///
    /// `A`, `C`, `G`, `U` in either case map to their bases; `&`, `-` and
    /// `+` are cut markers; anything else is `Undefined`. Cut markers and
    /// unknown characters are rejected unless the matching flag is set.
    pub fn from_char(c: char, allow_cut: bool, allow_unknown: bool) -> Result<Self> {
        match c {
            'A' | 'a' => Ok(RnaBase::Adenine),
            'C' | 'c' => Ok(RnaBase::Cytosine),
            'G' | 'g' => Ok(RnaBase::Guanine),
            'U' | 'u' => Ok(RnaBase::Uracil),
            c if CUT_MARKERS.contains(&c) && allow_cut => Ok(RnaBase::Cut),
            c if CUT_MARKERS.contains(&c) => Err(Error::InvalidBase(c)),
            _ if allow_unknown => Ok(RnaBase::Undefined),
            _ => Err(Error::InvalidBase(c)),
        }
    }

    /// Convert a base back to its character (`&` for a cut, `?` for unknown).
    pub fn to_char(self, allow_cut: bool, allow_unknown: bool) -> Result<char> {
        match self {
            RnaBase::Adenine => Ok('A'),
            RnaBase::Cytosine => Ok('C'),
            RnaBase::Guanine => Ok('G'),
            RnaBase::Uracil => Ok('U'),
            RnaBase::Cut if allow_cut => Ok('&'),
            RnaBase::Undefined if allow_unknown => Ok('?'),
            _ => Err(Error::UnprintableBase(self)),
        }
    }
}

/// Pair type code for the ordered base pair `(a, b)`; 0 means no pair.
pub fn pair_type(a: RnaBase, b: RnaBase) -> u8 {
    let (a, b) = (a.code() as usize, b.code() as usize);
    if a >= 8 || b >= 8 {
        return 0;
    }
    PAIR_TYPE_MAT[a * 8 + b]
}

/// Whether `a` and `b` can form a base pair.
pub fn can_pair(a: RnaBase, b: RnaBase) -> bool {
    pair_type(a, b) != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use RnaBase::*;

    #[test]
    fn test_watson_crick_and_wobble() {
        assert_eq!(pair_type(Cytosine, Guanine), 1);
        assert_eq!(pair_type(Guanine, Cytosine), 2);
        assert_eq!(pair_type(Guanine, Uracil), 3);
        assert_eq!(pair_type(Uracil, Guanine), 4);
        assert_eq!(pair_type(Adenine, Uracil), 5);
        assert_eq!(pair_type(Uracil, Adenine), 6);
    }

    #[test]
    fn test_non_pairs() {
        assert!(!can_pair(Adenine, Adenine));
        assert!(!can_pair(Adenine, Guanine));
        assert!(!can_pair(Cytosine, Uracil));
        assert!(!can_pair(Cut, Guanine));
        assert!(!can_pair(Adenine, Cut));
    }

    #[test]
    fn test_from_char_case_insensitive() {
        assert_eq!(RnaBase::from_char('g', false, false), Ok(Guanine));
        assert_eq!(RnaBase::from_char('U', false, false), Ok(Uracil));
    }

    #[test]
    fn test_from_char_flags() {
        assert_eq!(RnaBase::from_char('&', true, false), Ok(Cut));
        assert_eq!(RnaBase::from_char('+', true, false), Ok(Cut));
        assert_eq!(RnaBase::from_char('-', false, true), Err(Error::InvalidBase('-')));
        assert_eq!(RnaBase::from_char('N', true, true), Ok(Undefined));
        assert_eq!(RnaBase::from_char('N', true, false), Err(Error::InvalidBase('N')));
    }

    #[test]
    fn test_every_cut_marker_is_a_cut() {
        for c in CUT_MARKERS {
            assert_eq!(RnaBase::from_char(c, true, false), Ok(Cut));
            assert_eq!(RnaBase::from_char(c, false, true), Err(Error::InvalidBase(c)));
        }
    }

    #[test]
    fn test_to_char_flags() {
        assert_eq!(Adenine.to_char(false, false), Ok('A'));
        assert_eq!(Cut.to_char(true, false), Ok('&'));
        assert_eq!(Undefined.to_char(false, true), Ok('?'));
        assert_eq!(Cut.to_char(false, true), Err(Error::UnprintableBase(Cut)));
        assert_eq!(Undefined.to_char(true, false), Err(Error::UnprintableBase(Undefined)));
    }

    #[test]
    fn test_code_roundtrip() {
        for base in [Undefined, Adenine, Cytosine, Guanine, Uracil, Cut] {
            assert_eq!(RnaBase::from_code(base.code()), base);
        }
        assert_eq!(RnaBase::from_code(7), Undefined);
    }
}
