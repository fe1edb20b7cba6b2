use serde::{Deserialize, Serialize};
use std::fmt;

/// The four concrete nucleotides, in canonical order
pub const BASES: [u8; 4] = *b"ACGT";

/// Gap allele used in bracket notation for insertions/deletions
pub const GAP: u8 = b'-';

/// Classification of a single input symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    /// A, C, G or T
    Base,
    /// One of the 11 IUPAC ambiguity letters
    Ambiguity,
    /// `[`, `/`, `]` or `-`
    Structural,
    /// Anything else; dropped during parsing
    Other,
}

/// Classify an (already upper-cased) byte
#[must_use]
pub fn classify(symbol: u8) -> SymbolClass {
    match symbol {
        b'A' | b'C' | b'G' | b'T' => SymbolClass::Base,
        b'[' | b'/' | b']' | GAP => SymbolClass::Structural,
        _ if AmbiguityCode::from_byte(symbol).is_some() => SymbolClass::Ambiguity,
        _ => SymbolClass::Other,
    }
}

/// True for bases and ambiguity letters, the only symbols a scanned sequence keeps
#[must_use]
pub fn is_sequence_symbol(symbol: u8) -> bool {
    matches!(classify(symbol), SymbolClass::Base | SymbolClass::Ambiguity)
}

/// Upper-case `text` and keep only bases and ambiguity letters.
///
/// Used both for allele sequences before scanning and for enzyme recognition
/// patterns, which drop cut markers (`^`) and offset annotations like `(8/13)`.
#[must_use]
pub fn clean_sequence(text: &str) -> String {
    text.bytes()
        .map(|b| b.to_ascii_uppercase())
        .filter(|&b| is_sequence_symbol(b))
        .map(char::from)
        .collect()
}

/// Complement of a single symbol. Structural symbols map to themselves.
#[must_use]
pub fn complement_symbol(symbol: u8) -> Option<u8> {
    match symbol {
        b'A' => Some(b'T'),
        b'T' => Some(b'A'),
        b'C' => Some(b'G'),
        b'G' => Some(b'C'),
        b'[' | b'/' | b']' | GAP => Some(symbol),
        _ => AmbiguityCode::from_byte(symbol).map(|code| code.complement().as_byte()),
    }
}

/// IUPAC nucleotide ambiguity code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmbiguityCode {
    /// A or C
    M,
    /// A or G
    R,
    /// A or T
    W,
    /// C or G
    S,
    /// C or T
    Y,
    /// G or T
    K,
    /// A, C or G
    V,
    /// A, C or T
    H,
    /// A, G or T
    D,
    /// C, G or T
    B,
    /// Any base
    N,
}

impl AmbiguityCode {
    /// All codes, smallest base sets first
    pub const ALL: [Self; 11] = [
        Self::M,
        Self::R,
        Self::W,
        Self::S,
        Self::Y,
        Self::K,
        Self::V,
        Self::H,
        Self::D,
        Self::B,
        Self::N,
    ];

    /// Parse an ambiguity letter (case-insensitive)
    #[must_use]
    pub fn from_byte(symbol: u8) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            b'M' => Some(Self::M),
            b'R' => Some(Self::R),
            b'W' => Some(Self::W),
            b'S' => Some(Self::S),
            b'Y' => Some(Self::Y),
            b'K' => Some(Self::K),
            b'V' => Some(Self::V),
            b'H' => Some(Self::H),
            b'D' => Some(Self::D),
            b'B' => Some(Self::B),
            b'N' => Some(Self::N),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_byte(self) -> u8 {
        match self {
            Self::M => b'M',
            Self::R => b'R',
            Self::W => b'W',
            Self::S => b'S',
            Self::Y => b'Y',
            Self::K => b'K',
            Self::V => b'V',
            Self::H => b'H',
            Self::D => b'D',
            Self::B => b'B',
            Self::N => b'N',
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        char::from(self.as_byte())
    }

    /// Concrete bases represented by this code, in canonical order
    #[must_use]
    pub fn bases(self) -> &'static [u8] {
        match self {
            Self::M => b"AC",
            Self::R => b"AG",
            Self::W => b"AT",
            Self::S => b"CG",
            Self::Y => b"CT",
            Self::K => b"GT",
            Self::V => b"ACG",
            Self::H => b"ACT",
            Self::D => b"AGT",
            Self::B => b"CGT",
            Self::N => b"ACGT",
        }
    }

    /// Code of the complementary base set
    #[must_use]
    pub fn complement(self) -> Self {
        match self {
            Self::M => Self::K,
            Self::K => Self::M,
            Self::R => Self::Y,
            Self::Y => Self::R,
            Self::W => Self::W,
            Self::S => Self::S,
            Self::V => Self::B,
            Self::B => Self::V,
            Self::H => Self::D,
            Self::D => Self::H,
            Self::N => Self::N,
        }
    }

    /// The code whose base set equals `bases`, ignoring order.
    ///
    /// Returns `None` for duplicates, non-base symbols, or sets of fewer
    /// than two bases.
    #[must_use]
    pub fn from_bases(bases: &[u8]) -> Option<Self> {
        let mut sorted = bases.to_vec();
        sorted.sort_unstable();
        let len_before = sorted.len();
        sorted.dedup();
        if sorted.len() != len_before {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|code| code.bases() == sorted.as_slice())
    }
}

impl fmt::Display for AmbiguityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Explicit allele list at one variant position, e.g. `[A/G]` or `[-/AGC]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlleleSet(pub Vec<String>);

impl AlleleSet {
    pub fn new(alleles: Vec<String>) -> Self {
        Self(alleles)
    }

    /// Split the inside of a bracket group (`A/G`, without the brackets)
    #[must_use]
    pub fn from_bracket_body(body: &str) -> Self {
        Self(body.split('/').map(str::to_string).collect())
    }

    #[must_use]
    pub fn alleles(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical ambiguity code for this allele list.
    ///
    /// Only sets of distinct single bases map to a specific code; gaps,
    /// multi-base alleles and degenerate sets map to `N`.
    #[must_use]
    pub fn code(&self) -> AmbiguityCode {
        let mut bases = Vec::with_capacity(self.0.len());
        for allele in &self.0 {
            match allele.as_bytes() {
                [b @ (b'A' | b'C' | b'G' | b'T')] => bases.push(*b),
                _ => return AmbiguityCode::N,
            }
        }
        AmbiguityCode::from_bases(&bases).unwrap_or(AmbiguityCode::N)
    }

    /// Render as bracket notation, e.g. `[A/C]`
    #[must_use]
    pub fn to_bracket(&self) -> String {
        format!("[{}]", self.0.join("/"))
    }
}

impl fmt::Display for AlleleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bracket())
    }
}

/// Canonical ambiguity code for an allele list
#[must_use]
pub fn dntps_to_iupac(alleles: &AlleleSet) -> AmbiguityCode {
    alleles.code()
}

/// Explicit allele list of an ambiguity code, in canonical base order
#[must_use]
pub fn iupac_to_dntps(code: AmbiguityCode) -> AlleleSet {
    AlleleSet(
        code.bases()
            .iter()
            .map(|&b| char::from(b).to_string())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_every_code() {
        let expected: [(u8, &[u8]); 11] = [
            (b'M', b"AC"),
            (b'R', b"AG"),
            (b'W', b"AT"),
            (b'S', b"CG"),
            (b'Y', b"CT"),
            (b'K', b"GT"),
            (b'V', b"ACG"),
            (b'H', b"ACT"),
            (b'D', b"AGT"),
            (b'B', b"CGT"),
            (b'N', b"ACGT"),
        ];
        for (letter, bases) in expected {
            let code = AmbiguityCode::from_byte(letter).unwrap();
            assert_eq!(code.bases(), bases, "code {}", char::from(letter));
            assert_eq!(code.as_byte(), letter);
        }
    }

    #[test]
    fn test_complement_is_involution() {
        for code in AmbiguityCode::ALL {
            assert_eq!(code.complement().complement(), code);
            let complemented: Vec<u8> = code
                .bases()
                .iter()
                .map(|&b| complement_symbol(b).unwrap())
                .collect();
            assert_eq!(
                AmbiguityCode::from_bases(&complemented),
                Some(code.complement())
            );
        }
    }

    #[test]
    fn test_dntps_round_trip() {
        for code in AmbiguityCode::ALL {
            assert_eq!(dntps_to_iupac(&iupac_to_dntps(code)), code);
        }
    }

    #[test]
    fn test_canonical_code_ignores_order() {
        let set = AlleleSet::from_bracket_body("T/A/G");
        assert_eq!(set.code(), AmbiguityCode::D);
        let set = AlleleSet::from_bracket_body("G/C");
        assert_eq!(set.code(), AmbiguityCode::S);
    }

    #[test]
    fn test_degenerate_sets_map_to_n() {
        assert_eq!(AlleleSet::from_bracket_body("-/G").code(), AmbiguityCode::N);
        assert_eq!(AlleleSet::from_bracket_body("A/A").code(), AmbiguityCode::N);
        assert_eq!(AlleleSet::from_bracket_body("A/C/C").code(), AmbiguityCode::N);
        assert_eq!(AlleleSet::from_bracket_body("A/GC").code(), AmbiguityCode::N);
        assert_eq!(AlleleSet::from_bracket_body("A").code(), AmbiguityCode::N);
        assert_eq!(
            AlleleSet::from_bracket_body("A/C/G/T").code(),
            AmbiguityCode::N
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(b'A'), SymbolClass::Base);
        assert_eq!(classify(b'N'), SymbolClass::Ambiguity);
        assert_eq!(classify(b'['), SymbolClass::Structural);
        assert_eq!(classify(b'-'), SymbolClass::Structural);
        assert_eq!(classify(b'X'), SymbolClass::Other);
        assert_eq!(classify(b'^'), SymbolClass::Other);
    }

    #[test]
    fn test_clean_sequence_strips_site_annotations() {
        assert_eq!(clean_sequence("(10/15)GTacd^Cnnn"), "GTACDCNNN");
        assert_eq!(clean_sequence("GAATTC"), "GAATTC");
        assert_eq!(clean_sequence("?"), "");
    }

    #[test]
    fn test_bracket_rendering() {
        let set = AlleleSet::from_bracket_body("-/AGC");
        assert_eq!(set.alleles(), &["-".to_string(), "AGC".to_string()]);
        assert_eq!(set.to_bracket(), "[-/AGC]");
    }
}
