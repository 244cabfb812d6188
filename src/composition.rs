//src/composition.rs

use ahash::AHashMap;

/// Per-symbol tally over one normalized sequence.
///
/// Counts are the source of truth; percentages and derived metrics are
/// computed views and are never folded back into the counts. Entries
/// iterate in first-appearance order so display output is stable for a
/// given input.
#[derive(Debug, Clone)]
pub struct Composition {
    counts: AHashMap<u8, u64>,
    order: Vec<u8>,
    total: u64,
}

impl Composition {
    /// Tallies every symbol of `seq` in one pass.
    pub fn of(seq: &str) -> Self {
        let mut counts: AHashMap<u8, u64> = AHashMap::new();
        let mut order = Vec::new();
        for &b in seq.as_bytes() {
            let count = counts.entry(b).or_insert(0);
            if *count == 0 {
                order.push(b);
            }
            *count += 1;
        }
        Self {
            counts,
            order,
            total: seq.len() as u64,
        }
    }

    /// Total number of symbols tallied.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Count for one symbol, 0 when never observed.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Share of the total for one symbol, as a percentage.
    pub fn percent(&self, symbol: u8) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(symbol) as f64 / self.total as f64 * 100.0
    }

    /// Number of distinct symbols observed.
    pub fn distinct(&self) -> usize {
        self.order.len()
    }

    /// Symbols with counts and percentages, in first-appearance order.
    pub fn entries(&self) -> impl Iterator<Item = (char, u64, f64)> + '_ {
        self.order
            .iter()
            .map(move |&b| (b as char, self.count(b), self.percent(b)))
    }

    /// G+C share of the sequence, as a percentage.
    pub fn gc_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.count(b'G') + self.count(b'C')) as f64 / self.total as f64 * 100.0
    }

    /// Number of N symbols.
    pub fn n_count(&self) -> u64 {
        self.count(b'N')
    }

    /// N share of the sequence, as a percentage.
    pub fn n_percent(&self) -> f64 {
        self.percent(b'N')
    }
}
