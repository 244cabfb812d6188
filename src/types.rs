//src/types.rs

use std::fmt;

use crate::error::SequenceError;

/// Uppercase symbols accepted in a normalized sequence: the four DNA bases,
/// uracil, and the IUPAC ambiguity codes.
pub const NUCLEOTIDE_ALPHABET: &[u8] = b"ACGTUNRYSWKMBDHV";

/// Returns `true` if `symbol` (assumed uppercase ASCII) is part of the
/// accepted alphabet.
#[inline]
pub fn is_nucleotide(symbol: u8) -> bool {
    NUCLEOTIDE_ALPHABET.contains(&symbol)
}

/// Alphabet classification of a sequence.
///
/// Derived from T/U presence and never stored on the record: RNA when U is
/// present and T absent, DNA when T is present and U absent, UNKNOWN when
/// both or neither appear. Ambiguity codes take no part in the decision.
/// UNKNOWN selects transform rules but never blocks composition, skew, or
/// codon analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceType {
    Dna,
    Rna,
    Unknown,
}

impl SequenceType {
    /// Scans the sequence for T/U presence and classifies it.
    pub fn detect(seq: &str) -> Self {
        let mut has_t = false;
        let mut has_u = false;
        for &b in seq.as_bytes() {
            match b {
                b'T' => has_t = true,
                b'U' => has_u = true,
                _ => {}
            }
            if has_t && has_u {
                break;
            }
        }
        match (has_t, has_u) {
            (true, false) => SequenceType::Dna,
            (false, true) => SequenceType::Rna,
            _ => SequenceType::Unknown,
        }
    }
}

impl fmt::Display for SequenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SequenceType::Dna => "DNA",
            SequenceType::Rna => "RNA",
            SequenceType::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// One loaded sequence with its normalized text.
///
/// `seq` is whitespace-free, uppercase, and validated against
/// [`NUCLEOTIDE_ALPHABET`]. The constructor is the only way to build a
/// record, so downstream passes never re-check symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// FASTA identifier (first word of the header line), if any.
    pub id: Option<String>,
    /// Remainder of the FASTA header after the identifier, if any.
    pub description: Option<String>,
    /// Normalized sequence text.
    pub seq: String,
}

impl SequenceRecord {
    /// Builds a record from raw text: strips all whitespace, uppercases,
    /// and validates every remaining symbol. An empty result or an
    /// out-of-alphabet symbol is a load-time error.
    pub fn from_raw(
        id: Option<String>,
        description: Option<String>,
        raw: &str,
    ) -> Result<Self, SequenceError> {
        let mut seq = String::with_capacity(raw.len());
        for ch in raw.chars() {
            if ch.is_whitespace() {
                continue;
            }
            let upper = ch.to_ascii_uppercase();
            if !upper.is_ascii() || !is_nucleotide(upper as u8) {
                return Err(SequenceError::InvalidSymbol {
                    symbol: ch,
                    position: seq.len(),
                });
            }
            seq.push(upper);
        }
        if seq.is_empty() {
            return Err(SequenceError::EmptyInput);
        }
        Ok(Self {
            id,
            description,
            seq,
        })
    }

    /// Length of the normalized sequence in bases.
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Always `false` for a constructed record; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Classifies this record's alphabet.
    pub fn sequence_type(&self) -> SequenceType {
        SequenceType::detect(&self.seq)
    }

    /// Full FASTA-style title: id plus description when present.
    pub fn title(&self) -> Option<String> {
        match (&self.id, &self.description) {
            (Some(id), Some(desc)) => Some(format!("{} {}", id, desc)),
            (Some(id), None) => Some(id.clone()),
            (None, Some(desc)) => Some(desc.clone()),
            (None, None) => None,
        }
    }
}
