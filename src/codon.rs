//src/codon.rs

use ahash::AHashMap;

/// Tally of one codon plus the triplet index where it first appeared,
/// which is the ranking tie-breaker.
#[derive(Debug, Clone, Copy)]
struct CodonEntry {
    count: u64,
    first_seen: usize,
}

/// Frequency table over non-overlapping triplets.
///
/// The sequence is read left to right in windows of three starting at
/// position 0; a trailing window of one or two symbols is discarded, so
/// the table always holds floor(len / 3) codons.
#[derive(Debug, Clone)]
pub struct CodonTable {
    entries: AHashMap<[u8; 3], CodonEntry>,
    total_codons: u64,
}

impl CodonTable {
    /// Slices `seq` into triplets and tallies them.
    pub fn build(seq: &str) -> Self {
        let mut entries: AHashMap<[u8; 3], CodonEntry> = AHashMap::new();
        let mut total_codons = 0u64;
        for (index, chunk) in seq.as_bytes().chunks_exact(3).enumerate() {
            let codon = [chunk[0], chunk[1], chunk[2]];
            let entry = entries.entry(codon).or_insert(CodonEntry {
                count: 0,
                first_seen: index,
            });
            entry.count += 1;
            total_codons += 1;
        }
        Self {
            entries,
            total_codons,
        }
    }

    /// Number of complete triplets read.
    pub fn total_codons(&self) -> u64 {
        self.total_codons
    }

    /// Number of distinct codons observed.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Count for one codon, 0 when never observed or not a triplet.
    pub fn count(&self, codon: &str) -> u64 {
        match <[u8; 3]>::try_from(codon.as_bytes()) {
            Ok(key) => self.entries.get(&key).map(|e| e.count).unwrap_or(0),
            Err(_) => 0,
        }
    }

    /// The `n` most frequent codons, most frequent first. Ties resolve to
    /// the codon that appeared earlier in the sequence, so the ranking is
    /// deterministic for a given input.
    pub fn top(&self, n: usize) -> Vec<(String, u64)> {
        let mut ranked: Vec<(&[u8; 3], &CodonEntry)> = self.entries.iter().collect();
        ranked.sort_by_key(|(_, entry)| (std::cmp::Reverse(entry.count), entry.first_seen));
        ranked
            .into_iter()
            .take(n)
            .map(|(codon, entry)| (String::from_utf8_lossy(codon).into_owned(), entry.count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_floor_of_len_over_three() {
        assert_eq!(CodonTable::build("AATTGGCC").total_codons(), 2);
        assert_eq!(CodonTable::build("AATTGGCCA").total_codons(), 3);
        assert_eq!(CodonTable::build("AA").total_codons(), 0);
        assert_eq!(CodonTable::build("").total_codons(), 0);
    }

    #[test]
    fn test_trailing_remainder_is_discarded() {
        // AAA then a lone C that never forms a codon
        let table = CodonTable::build("AAAC");
        assert_eq!(table.total_codons(), 1);
        assert_eq!(table.count("AAA"), 1);
        assert_eq!(table.count("AAC"), 0);
    }

    #[test]
    fn test_non_overlapping_windows() {
        // ATG ATG ATG, never TGA
        let table = CodonTable::build("ATGATGATG");
        assert_eq!(table.count("ATG"), 3);
        assert_eq!(table.count("TGA"), 0);
        assert_eq!(table.distinct(), 1);
    }

    #[test]
    fn test_top_orders_by_count_then_first_appearance() {
        // GGG x2, then AAA and CCC once each with AAA appearing first
        let table = CodonTable::build("GGGAAACCCGGG");
        let top = table.top(5);
        assert_eq!(
            top,
            vec![
                ("GGG".to_string(), 2),
                ("AAA".to_string(), 1),
                ("CCC".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_five_drops_rarest_of_many_distinct() {
        // 7 distinct codons with counts 4, 3, 3, 2, 2, 1, 1; the two
        // singletons TGA and CAT must fall off a top-5 ranking
        let table = CodonTable::build("AAACCCGGGTTTACGTGACATAAACCCGGGTTTACGAAACCCGGGAAA");
        assert_eq!(table.total_codons(), 16);
        assert_eq!(table.distinct(), 7);
        let top = table.top(5);
        assert_eq!(
            top,
            vec![
                ("AAA".to_string(), 4),
                ("CCC".to_string(), 3),
                ("GGG".to_string(), 3),
                ("TTT".to_string(), 2),
                ("ACG".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_top_truncates_to_available_codons() {
        let table = CodonTable::build("AAATTT");
        assert_eq!(table.top(5).len(), 2);
        assert_eq!(table.top(1).len(), 1);
        assert_eq!(CodonTable::build("AA").top(5).len(), 0);
    }
}
