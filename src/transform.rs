//src/transform.rs

use crate::error::SequenceError;
use crate::types::SequenceType;

/// Complement of one DNA symbol under IUPAC rules, `None` when undefined
/// (U has no DNA complement).
fn dna_complement(symbol: u8) -> Option<u8> {
    let comp = match symbol {
        b'A' => b'T',
        b'T' => b'A',
        b'G' => b'C',
        b'C' => b'G',
        b'R' => b'Y', // A/G <-> T/C
        b'Y' => b'R',
        b'S' => b'S', // G/C is self-complementary
        b'W' => b'W', // A/T is self-complementary
        b'K' => b'M', // G/T <-> A/C
        b'M' => b'K',
        b'B' => b'V', // C/G/T <-> A/C/G
        b'V' => b'B',
        b'D' => b'H', // A/G/T <-> A/C/T
        b'H' => b'D',
        b'N' => b'N',
        _ => return None,
    };
    Some(comp)
}

/// Complement of one RNA symbol under IUPAC rules, `None` when undefined
/// (T has no RNA complement).
fn rna_complement(symbol: u8) -> Option<u8> {
    let comp = match symbol {
        b'A' => b'U',
        b'U' => b'A',
        b'G' => b'C',
        b'C' => b'G',
        b'R' => b'Y',
        b'Y' => b'R',
        b'S' => b'S',
        b'W' => b'W',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        b'N' => b'N',
        _ => return None,
    };
    Some(comp)
}

/// Picks the complement table for a classification. UNKNOWN falls back to
/// DNA rules; a stray U then fails with `UnsupportedSymbol` rather than
/// guessing a strand.
fn complement_table(sequence_type: SequenceType) -> fn(u8) -> Option<u8> {
    match sequence_type {
        SequenceType::Rna => rna_complement,
        SequenceType::Dna | SequenceType::Unknown => dna_complement,
    }
}

/// Complements every symbol of `seq` under the rules for `sequence_type`.
/// Fails at the leftmost symbol with no defined complement.
pub fn complement(seq: &str, sequence_type: SequenceType) -> Result<String, SequenceError> {
    let table = complement_table(sequence_type);
    let mut out = String::with_capacity(seq.len());
    for (position, &b) in seq.as_bytes().iter().enumerate() {
        match table(b) {
            Some(comp) => out.push(comp as char),
            None => {
                return Err(SequenceError::UnsupportedSymbol {
                    symbol: b as char,
                    position,
                })
            }
        }
    }
    Ok(out)
}

/// Complements `seq`, then reverses the symbol order.
pub fn reverse_complement(seq: &str, sequence_type: SequenceType) -> Result<String, SequenceError> {
    let complemented = complement(seq, sequence_type)?;
    Ok(complemented.chars().rev().collect())
}

/// RNA form of `seq`.
///
/// DNA transcribes by substituting U for T; RNA is already transcribed and
/// comes back unchanged; an UNKNOWN classification has no defined direction
/// and yields `None`.
pub fn transcribe(seq: &str, sequence_type: SequenceType) -> Option<String> {
    match sequence_type {
        SequenceType::Dna => Some(
            seq.chars()
                .map(|c| if c == 'T' { 'U' } else { c })
                .collect(),
        ),
        SequenceType::Rna => Some(seq.to_string()),
        SequenceType::Unknown => None,
    }
}

/// Selector for one member of a [`TransformSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Transcript,
    Complement,
    ReverseComplement,
}

impl TransformKind {
    /// Lowercase name used in FASTA headers and export file names.
    pub fn label(self) -> &'static str {
        match self {
            TransformKind::Transcript => "transcript",
            TransformKind::Complement => "complement",
            TransformKind::ReverseComplement => "reverse_complement",
        }
    }

    /// All kinds in display order.
    pub fn all() -> [TransformKind; 3] {
        [
            TransformKind::Transcript,
            TransformKind::Complement,
            TransformKind::ReverseComplement,
        ]
    }
}

/// The three strand transforms of one analysis run.
///
/// Members fail independently: a symbol with no complement poisons the
/// complement and reverse complement only, and an UNKNOWN classification
/// withholds the transcript, while every other result stays available.
#[derive(Debug)]
pub struct TransformSet {
    /// RNA form, `None` when not applicable (UNKNOWN classification).
    pub transcript: Option<String>,
    pub complement: Result<String, SequenceError>,
    pub reverse_complement: Result<String, SequenceError>,
}

impl TransformSet {
    /// Runs all three transforms under the rules chosen by `sequence_type`.
    pub fn build(seq: &str, sequence_type: SequenceType) -> Self {
        Self {
            transcript: transcribe(seq, sequence_type),
            complement: complement(seq, sequence_type),
            reverse_complement: reverse_complement(seq, sequence_type),
        }
    }

    /// Borrows one member by kind: `Ok(None)` when not applicable, `Err`
    /// when that transform failed on this sequence.
    pub fn get(&self, kind: TransformKind) -> Result<Option<&str>, &SequenceError> {
        match kind {
            TransformKind::Transcript => Ok(self.transcript.as_deref()),
            TransformKind::Complement => self.complement.as_ref().map(|s| Some(s.as_str())),
            TransformKind::ReverseComplement => {
                self.reverse_complement.as_ref().map(|s| Some(s.as_str()))
            }
        }
    }
}
