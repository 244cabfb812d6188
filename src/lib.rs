// src/lib.rs
pub mod types;
pub mod error;
pub mod composition;
pub mod skew;
pub mod codon;
pub mod transform;
pub mod fasta;
pub mod report;
pub mod batch;

use std::path::Path;

use crate::codon::CodonTable;
use crate::composition::Composition;
use crate::error::SequenceError;
use crate::skew::SkewReport;
use crate::transform::TransformSet;
use crate::types::{SequenceRecord, SequenceType};

/// Everything one analysis run produces for one sequence.
/// Only structured data is stored; report text is generated on demand.
#[derive(Debug)]
pub struct AnalysisResult {
    /// The record that was analyzed (normalized text plus FASTA header parts)
    pub record: SequenceRecord,

    /// DNA/RNA/UNKNOWN classification of the record
    pub sequence_type: SequenceType,

    /// Per-symbol counts and percentage views
    pub composition: Composition,

    /// AT and GC skew, `None` where the denominator was zero
    pub skew: SkewReport,

    /// Non-overlapping triplet frequencies
    pub codons: CodonTable,

    /// Transcript, complement, and reverse complement; members carry their
    /// own failures without touching the rest of the result
    pub transforms: TransformSet,
}

impl AnalysisResult {
    /// Length of the analyzed sequence in bases.
    pub fn length(&self) -> usize {
        self.record.seq.len()
    }

    /// G+C share of the sequence, as a percentage.
    pub fn gc_percent(&self) -> f64 {
        self.composition.gc_percent()
    }

    /// Number of N symbols.
    pub fn n_count(&self) -> u64 {
        self.composition.n_count()
    }

    /// N share of the sequence, as a percentage.
    pub fn n_percent(&self) -> f64 {
        self.composition.n_percent()
    }

    /// Display name for reports: the record id, or a placeholder.
    pub fn display_name(&self) -> &str {
        self.record.id.as_deref().unwrap_or("unnamed sequence")
    }
}

/// Runs the full analysis over one validated record.
///
/// The record is immutable throughout and the result is never mutated
/// after this returns; repeated calls on the same record give identical
/// results.
pub fn analyze_record(record: SequenceRecord) -> AnalysisResult {
    // 1. Classify the alphabet (drives transform rule selection)
    let sequence_type = SequenceType::detect(&record.seq);

    // 2. Tally symbols, then derive skews from the same counts
    let composition = Composition::of(&record.seq);
    let skew = SkewReport::from_composition(&composition);

    // 3. Codon frequencies over non-overlapping triplets
    let codons = CodonTable::build(&record.seq);

    // 4. Strand transforms under the classified rules
    let transforms = TransformSet::build(&record.seq, sequence_type);

    log::info!(
        "analyzed {} ({} bases, {}, GC {:.2}%)",
        record.id.as_deref().unwrap_or("<pasted>"),
        record.seq.len(),
        sequence_type,
        composition.gc_percent()
    );

    AnalysisResult {
        record,
        sequence_type,
        composition,
        skew,
        codons,
        transforms,
    }
}

/// Parses pasted text (raw bases or FASTA) and analyzes it.
pub fn analyze_text(text: &str) -> Result<AnalysisResult, SequenceError> {
    let record = fasta::parse_input(text)?;
    Ok(analyze_record(record))
}

/// Loads the first record of a FASTA file (plain or gzipped) and analyzes it.
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<AnalysisResult, SequenceError> {
    let record = fasta::load_sequence(path)?;
    Ok(analyze_record(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TransformKind;

    #[test]
    fn test_analyze_balanced_dna() {
        let result = analyze_text("AATTGGCC").unwrap();

        assert_eq!(result.sequence_type, SequenceType::Dna);
        assert_eq!(result.length(), 8);
        for symbol in [b'A', b'T', b'G', b'C'] {
            assert!((result.composition.percent(symbol) - 25.0).abs() < 1e-9);
        }
        assert_eq!(result.skew.at_skew, Some(0.0));
        assert_eq!(result.skew.gc_skew, Some(0.0));
        assert_eq!(result.codons.total_codons(), 2);
        assert_eq!(
            result.transforms.get(TransformKind::Complement).unwrap(),
            Some("TTAACCGG")
        );
        assert_eq!(
            result.transforms.get(TransformKind::ReverseComplement).unwrap(),
            Some("GGCCAATT")
        );
        assert_eq!(
            result.transforms.get(TransformKind::Transcript).unwrap(),
            Some("AAUUGGCC")
        );
    }

    #[test]
    fn test_analyze_all_n() {
        let result = analyze_text("NNNNNN").unwrap();

        assert_eq!(result.sequence_type, SequenceType::Unknown);
        assert_eq!(result.n_count(), 6);
        assert!((result.n_percent() - 100.0).abs() < 1e-9);
        assert_eq!(result.skew.at_skew, None);
        assert_eq!(result.skew.gc_skew, None);
        // N complements to N even though the strand is unknown
        assert_eq!(
            result.transforms.get(TransformKind::Complement).unwrap(),
            Some("NNNNNN")
        );
        assert_eq!(result.transforms.transcript, None);
    }

    #[test]
    fn test_analyze_empty_input() {
        assert!(matches!(analyze_text(""), Err(SequenceError::EmptyInput)));
        assert!(matches!(
            analyze_text("  \n\t"),
            Err(SequenceError::EmptyInput)
        ));
    }

    #[test]
    fn test_transform_failure_leaves_other_results_intact() {
        // T and U together: UNKNOWN type, complement fails on U, but
        // composition, skew, and codons are all still there
        let result = analyze_text("ACGTU").unwrap();
        assert_eq!(result.sequence_type, SequenceType::Unknown);
        assert_eq!(result.composition.total(), 5);
        assert_eq!(result.codons.total_codons(), 1);
        assert!(result.skew.at_skew.is_some());
        assert!(result.transforms.complement.is_err());
        assert_eq!(result.transforms.transcript, None);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let a = analyze_text("GATTACAGATTACA").unwrap();
        let b = analyze_text("GATTACAGATTACA").unwrap();
        assert_eq!(a.sequence_type, b.sequence_type);
        assert_eq!(a.skew, b.skew);
        assert_eq!(a.codons.top(5), b.codons.top(5));
        assert_eq!(
            a.transforms.get(TransformKind::ReverseComplement).unwrap(),
            b.transforms.get(TransformKind::ReverseComplement).unwrap()
        );
    }

    #[test]
    fn test_analyze_rna_text() {
        let result = analyze_text("augGCU").unwrap();
        assert_eq!(result.sequence_type, SequenceType::Rna);
        assert_eq!(result.record.seq, "AUGGCU");
        // RNA transcript is the sequence itself
        assert_eq!(
            result.transforms.get(TransformKind::Transcript).unwrap(),
            Some("AUGGCU")
        );
        assert_eq!(
            result.transforms.get(TransformKind::Complement).unwrap(),
            Some("UACCGA")
        );
    }
}
