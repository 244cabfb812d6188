//src/report.rs

use std::fmt::Write as FmtWrite;

use chrono::Utc;

use crate::error::SequenceError;
use crate::fasta;
use crate::transform::TransformKind;
use crate::AnalysisResult;

/// Bases shown in each sequence preview.
const PREVIEW_LEN: usize = 50;
/// Bases per space-separated display block inside a preview.
const PREVIEW_BLOCK: usize = 10;
/// How many of the most frequent codons the reports list.
const TOP_CODONS: usize = 5;

const REPORT_CSS: &str = r#"
        body {
            font-family: Arial, sans-serif;
            line-height: 1.6;
            color: #e0e0e0;
            background-color: #1e1e2f;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
        }
        h1, h2, h3 {
            color: #42b0f5;
        }
        h1 {
            border-bottom: 2px solid #42b0f5;
            padding-bottom: 10px;
        }
        h2 {
            border-bottom: 1px solid #3d3d5f;
            padding-bottom: 5px;
            margin-top: 30px;
        }
        h3 {
            margin-top: 20px;
            color: #3a9ee0;
        }
        .timestamp {
            color: #888888;
            font-style: italic;
            margin-bottom: 30px;
        }
        ul {
            list-style-type: none;
            padding-left: 10px;
        }
        li {
            margin-bottom: 8px;
            padding-left: 20px;
            position: relative;
        }
        li:before {
            content: "\2022";
            color: #42b0f5;
            font-weight: bold;
            position: absolute;
            left: 0;
        }
        .sequence-preview {
            font-family: monospace;
            background-color: #2d2d3f;
            color: #e0e0e0;
            padding: 15px;
            border-radius: 5px;
            overflow-x: auto;
            white-space: pre-wrap;
            border: 1px solid #3d3d5f;
            margin-bottom: 15px;
            font-size: 16px;
            letter-spacing: 1px;
        }
        .footer {
            margin-top: 40px;
            padding-top: 10px;
            border-top: 1px solid #3d3d5f;
            color: #888888;
            font-style: italic;
        }
        .key {
            font-weight: bold;
            color: #42b0f5;
        }
        .legend {
            background-color: #2d2d3f;
            padding: 15px;
            border-radius: 5px;
            margin-top: 15px;
            border: 1px solid #3d3d5f;
        }
        .legend h4 {
            color: #42b0f5;
            margin-top: 0;
            margin-bottom: 10px;
        }
        .legend-item {
            display: inline-block;
            margin-right: 20px;
            margin-bottom: 5px;
        }
        .legend-key {
            font-weight: bold;
            color: #42b0f5;
        }
"#;

const NUCLEOTIDE_LEGEND: &str = r#"    <div class="legend">
        <h4>Nucleotide Codes:</h4>
        <div class="legend-item"><span class="legend-key">A</span> = Adenine</div>
        <div class="legend-item"><span class="legend-key">C</span> = Cytosine</div>
        <div class="legend-item"><span class="legend-key">G</span> = Guanine</div>
        <div class="legend-item"><span class="legend-key">T</span> = Thymine</div>
        <div class="legend-item"><span class="legend-key">U</span> = Uracil (RNA only)</div>
        <div class="legend-item"><span class="legend-key">N</span> = Any nucleotide (A/C/G/T)</div>
        <div class="legend-item"><span class="legend-key">R</span> = Purine (A/G)</div>
        <div class="legend-item"><span class="legend-key">Y</span> = Pyrimidine (C/T)</div>
        <div class="legend-item"><span class="legend-key">S</span> = Strong bonds (G/C)</div>
        <div class="legend-item"><span class="legend-key">W</span> = Weak bonds (A/T)</div>
        <div class="legend-item"><span class="legend-key">K</span> = Keto (G/T)</div>
        <div class="legend-item"><span class="legend-key">M</span> = Amino (A/C)</div>
        <div class="legend-item"><span class="legend-key">B</span> = Not A (C/G/T)</div>
        <div class="legend-item"><span class="legend-key">D</span> = Not C (A/G/T)</div>
        <div class="legend-item"><span class="legend-key">H</span> = Not G (A/C/T)</div>
        <div class="legend-item"><span class="legend-key">V</span> = Not T (A/C/G)</div>
    </div>
"#;

impl AnalysisResult {
    /// Generates the full HTML report on demand.
    pub fn html_report(&self) -> String {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let mut html = String::with_capacity(8 * 1024);

        writeln!(
            html,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    \
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    \
             <title>{} Sequence Analysis Report</title>\n    <style>{}    </style>\n</head>\n<body>",
            self.sequence_type, REPORT_CSS
        )
        .unwrap();

        writeln!(
            html,
            "    <h1>\u{1F9EC} {} Sequence Analysis Report</h1>",
            self.sequence_type
        )
        .unwrap();
        writeln!(
            html,
            "    <div class=\"timestamp\">Generated on: {}</div>",
            timestamp
        )
        .unwrap();

        // Basic statistics
        html.push_str("\n    <h2>\u{1F4CA} Basic Statistics</h2>\n    <ul>\n");
        if let Some(title) = self.record.title() {
            writeln!(
                html,
                "        <li><span class=\"key\">Name:</span> {}</li>",
                escape_html(&title)
            )
            .unwrap();
        }
        writeln!(
            html,
            "        <li><span class=\"key\">Sequence Type:</span> {}</li>",
            self.sequence_type
        )
        .unwrap();
        writeln!(
            html,
            "        <li><span class=\"key\">Sequence Length:</span> {} bases</li>",
            group_thousands(self.length() as u64)
        )
        .unwrap();
        writeln!(
            html,
            "        <li><span class=\"key\">GC Content:</span> {:.2}%</li>",
            self.gc_percent()
        )
        .unwrap();
        writeln!(
            html,
            "        <li><span class=\"key\">Missing Bases (N):</span> {} positions ({:.2}%)</li>",
            group_thousands(self.n_count()),
            self.n_percent()
        )
        .unwrap();
        html.push_str("    </ul>\n");

        // Per-symbol composition
        html.push_str("\n    <h2>\u{1F52C} Nucleotide Analysis</h2>\n    <ul>\n");
        for (symbol, count, pct) in self.composition.entries() {
            writeln!(
                html,
                "        <li><span class=\"key\">{}:</span> {} ({:.2}%)</li>",
                symbol,
                group_thousands(count),
                pct
            )
            .unwrap();
        }
        html.push_str("    </ul>\n");
        html.push_str(NUCLEOTIDE_LEGEND);

        // Skews
        html.push_str("\n    <h2>\u{2696}\u{FE0F} Sequence Bias Analysis</h2>\n    <ul>\n");
        writeln!(
            html,
            "        <li><span class=\"key\">AT Skew:</span> {}</li>",
            skew_display(self.skew.at_skew)
        )
        .unwrap();
        writeln!(
            html,
            "        <li><span class=\"key\">GC Skew:</span> {}</li>",
            skew_display(self.skew.gc_skew)
        )
        .unwrap();
        html.push_str("    </ul>\n");

        // Codons
        html.push_str("\n    <h2>\u{1F9EC} Codon Analysis</h2>\n    <ul>\n");
        for (codon, count) in self.codons.top(TOP_CODONS) {
            writeln!(
                html,
                "        <li><span class=\"key\">{}:</span> {} times</li>",
                codon,
                group_thousands(count)
            )
            .unwrap();
        }
        html.push_str("    </ul>\n");

        // Previews; filtered views appear only when there is an N to hide
        html.push_str("\n    <h2>\u{1F50D} Sequence Preview</h2>\n    <div class=\"preview-section\">\n");
        if self.n_count() > 0 {
            preview_block(
                &mut html,
                "First 50 Bases (N's removed)",
                &filtered_head(&self.record.seq, PREVIEW_LEN),
            );
            preview_block(
                &mut html,
                "Last 50 Bases (N's removed)",
                &filtered_tail(&self.record.seq, PREVIEW_LEN),
            );
        }
        preview_block(
            &mut html,
            "Original Sequence (First 50)",
            &preview_head(&self.record.seq, PREVIEW_LEN),
        );
        preview_block(
            &mut html,
            "Original Sequence (Last 50)",
            &preview_tail(&self.record.seq, PREVIEW_LEN),
        );
        html.push_str("    </div>\n");

        writeln!(
            html,
            "\n    <div class=\"footer\">\n        <p>Generated by seqanalyzer</p>\n        \
             <p>Analysis Date: {}</p>\n    </div>\n</body>\n</html>",
            timestamp
        )
        .unwrap();

        html
    }

    /// Generates a compact plain-text summary on demand.
    pub fn text_report(&self) -> String {
        let mut out = String::new();
        writeln!(out, "Sequence Analysis Report").unwrap();
        writeln!(
            out,
            "Generated on: {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )
        .unwrap();
        writeln!(out).unwrap();
        writeln!(out, "Name:          {}", self.display_name()).unwrap();
        writeln!(out, "Sequence type: {}", self.sequence_type).unwrap();
        writeln!(
            out,
            "Length:        {} bases",
            group_thousands(self.length() as u64)
        )
        .unwrap();
        writeln!(out, "GC content:    {:.2}%", self.gc_percent()).unwrap();
        writeln!(
            out,
            "N bases:       {} ({:.2}%)",
            group_thousands(self.n_count()),
            self.n_percent()
        )
        .unwrap();
        writeln!(out, "AT skew:       {}", skew_display(self.skew.at_skew)).unwrap();
        writeln!(out, "GC skew:       {}", skew_display(self.skew.gc_skew)).unwrap();

        writeln!(out, "\nComposition:").unwrap();
        for (symbol, count, pct) in self.composition.entries() {
            writeln!(out, "  {}: {} ({:.2}%)", symbol, group_thousands(count), pct).unwrap();
        }

        let top = self.codons.top(TOP_CODONS);
        if !top.is_empty() {
            writeln!(out, "\nTop codons:").unwrap();
            for (codon, count) in top {
                writeln!(out, "  {}: {}", codon, group_thousands(count)).unwrap();
            }
        }

        writeln!(out, "\nFirst {} bases:", PREVIEW_LEN).unwrap();
        writeln!(out, "  {}", preview_head(&self.record.seq, PREVIEW_LEN)).unwrap();
        writeln!(out, "Last {} bases:", PREVIEW_LEN).unwrap();
        writeln!(out, "  {}", preview_tail(&self.record.seq, PREVIEW_LEN)).unwrap();

        out
    }

    /// FASTA header for an exported transform: "<id> <name>" when the input
    /// had an identifier, the bare transform name otherwise.
    pub fn export_header(&self, kind: TransformKind) -> String {
        match &self.record.id {
            Some(id) => format!("{} {}", id, kind.label()),
            None => kind.label().to_string(),
        }
    }

    /// FASTA text for one transform member: `Ok(None)` when that transform
    /// is not applicable to this sequence, `Err` when it failed.
    pub fn transform_fasta(&self, kind: TransformKind) -> Result<Option<String>, &SequenceError> {
        let member = self.transforms.get(kind)?;
        Ok(member.map(|seq| fasta::format_fasta(&self.export_header(kind), seq)))
    }

    /// The analyzed input itself as a FASTA record.
    pub fn input_fasta(&self) -> String {
        let header = self
            .record
            .title()
            .unwrap_or_else(|| "sequence".to_string());
        fasta::format_fasta(&header, &self.record.seq)
    }
}

/// Minimal HTML escaping for header-derived text.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn preview_block(html: &mut String, title: &str, body: &str) {
    writeln!(html, "        <h3>{}</h3>", title).unwrap();
    writeln!(html, "        <div class=\"sequence-preview\">{}</div>", body).unwrap();
}

/// Formats an integer with comma thousands separators, e.g. 1,234,567.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Renders a skew at 4 decimals, or "n/a" when undefined.
fn skew_display(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "n/a".to_string(),
    }
}

// Sequence text is ASCII by construction, so byte slicing below is safe.

/// First `n` bases, space-separated into display blocks.
fn preview_head(seq: &str, n: usize) -> String {
    chunk_blocks(&seq[..seq.len().min(n)])
}

/// Last `n` bases, space-separated into display blocks.
fn preview_tail(seq: &str, n: usize) -> String {
    chunk_blocks(&seq[seq.len().saturating_sub(n)..])
}

/// First `n` non-N bases, space-separated into display blocks.
fn filtered_head(seq: &str, n: usize) -> String {
    let head: String = seq.chars().filter(|&c| c != 'N').take(n).collect();
    chunk_blocks(&head)
}

/// Last `n` non-N bases in sequence order, space-separated into display
/// blocks.
fn filtered_tail(seq: &str, n: usize) -> String {
    let mut tail: Vec<char> = seq.chars().rev().filter(|&c| c != 'N').take(n).collect();
    tail.reverse();
    let tail: String = tail.into_iter().collect();
    chunk_blocks(&tail)
}

/// Space-separates a run of bases into fixed-width blocks.
fn chunk_blocks(seq: &str) -> String {
    seq.as_bytes()
        .chunks(PREVIEW_BLOCK)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze_text;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_skew_display() {
        assert_eq!(skew_display(Some(0.5)), "0.5000");
        assert_eq!(skew_display(Some(-1.0)), "-1.0000");
        assert_eq!(skew_display(None), "n/a");
    }

    #[test]
    fn test_preview_blocks() {
        let seq = "A".repeat(25);
        assert_eq!(
            preview_head(&seq, 50),
            format!("{} {} {}", "A".repeat(10), "A".repeat(10), "A".repeat(5))
        );
        let seq = "ACGTACGTACGTACGT";
        assert_eq!(preview_head(seq, 12), "ACGTACGTAC GT");
        // last 12 of a 16-base sequence starts at offset 4
        assert_eq!(preview_tail(seq, 12), "ACGTACGTAC GT");
    }

    #[test]
    fn test_preview_tail_takes_last_bases() {
        let seq = format!("{}{}", "A".repeat(60), "C".repeat(10));
        let tail = preview_tail(&seq, 50);
        assert!(tail.ends_with("CCCCCCCCCC"));
        assert_eq!(tail.replace(' ', "").len(), 50);
    }

    #[test]
    fn test_filtered_previews_drop_n() {
        assert_eq!(filtered_head("NNACGTNN", 50), "ACGT");
        assert_eq!(filtered_tail("NNACGTNN", 50), "ACGT");
        // order is preserved when truncating from the end
        assert_eq!(filtered_tail("AAAACCCCNN", 4), "CCCC");
        assert_eq!(filtered_head("AAAACCCCNN", 4), "AAAA");
    }

    #[test]
    fn test_html_report_contains_all_sections() {
        let result = analyze_text("AATTGGCC").unwrap();
        let html = result.html_report();

        assert!(html.contains("<title>DNA Sequence Analysis Report</title>"));
        assert!(html.contains("Basic Statistics"));
        assert!(html.contains("<span class=\"key\">Sequence Type:</span> DNA"));
        assert!(html.contains("<span class=\"key\">Sequence Length:</span> 8 bases"));
        assert!(html.contains("<span class=\"key\">GC Content:</span> 50.00%"));
        assert!(html.contains("<span class=\"key\">AT Skew:</span> 0.0000"));
        assert!(html.contains("<span class=\"key\">GC Skew:</span> 0.0000"));
        assert!(html.contains("Nucleotide Analysis"));
        assert!(html.contains("<span class=\"key\">A:</span> 2 (25.00%)"));
        assert!(html.contains("Uracil (RNA only)"));
        assert!(html.contains("Codon Analysis"));
        assert!(html.contains("<span class=\"key\">AAT:</span> 1 times"));
        assert!(html.contains("Original Sequence (First 50)"));
        assert!(html.contains("AATTGGCC"));
        assert!(html.contains("Generated on:"));
    }

    #[test]
    fn test_html_report_undefined_skews_render_na() {
        let result = analyze_text("NNNNNN").unwrap();
        let html = result.html_report();
        assert!(html.contains("<span class=\"key\">AT Skew:</span> n/a"));
        assert!(html.contains("<span class=\"key\">GC Skew:</span> n/a"));
        assert!(html.contains("<title>UNKNOWN Sequence Analysis Report</title>"));
    }

    #[test]
    fn test_html_report_filtered_previews_only_with_n() {
        let clean = analyze_text("ACGTACGT").unwrap();
        assert!(!clean.html_report().contains("N's removed"));

        let with_n = analyze_text("ACGTNNACGT").unwrap();
        let html = with_n.html_report();
        assert!(html.contains("First 50 Bases (N's removed)"));
        assert!(html.contains("ACGTACGT"));
        assert!(html.contains("<span class=\"key\">Missing Bases (N):</span> 2 positions (20.00%)"));
    }

    #[test]
    fn test_html_report_thousands_separator() {
        let result = analyze_text(&"ACGT".repeat(300)).unwrap();
        assert!(result
            .html_report()
            .contains("<span class=\"key\">Sequence Length:</span> 1,200 bases"));
    }

    #[test]
    fn test_text_report_summary() {
        let result = analyze_text(">amplicon test case\nAATTGGCC\n").unwrap();
        let text = result.text_report();
        assert!(text.contains("Name:          amplicon"));
        assert!(text.contains("Sequence type: DNA"));
        assert!(text.contains("Length:        8 bases"));
        assert!(text.contains("GC content:    50.00%"));
        assert!(text.contains("AT skew:       0.0000"));
        assert!(text.contains("A: 2 (25.00%)"));
    }

    #[test]
    fn test_transform_fasta_export() {
        let result = analyze_text(">amplicon\nAATTGGCC\n").unwrap();
        let fasta = result
            .transform_fasta(TransformKind::ReverseComplement)
            .unwrap()
            .unwrap();
        assert_eq!(fasta, ">amplicon reverse_complement\nGGCCAATT\n");

        // no id: header is the bare transform name
        let anon = analyze_text("AATTGGCC").unwrap();
        let fasta = anon.transform_fasta(TransformKind::Transcript).unwrap().unwrap();
        assert_eq!(fasta, ">transcript\nAAUUGGCC\n");
    }

    #[test]
    fn test_transform_fasta_not_applicable_and_failed() {
        let unknown = analyze_text("NNNN").unwrap();
        assert_eq!(unknown.transform_fasta(TransformKind::Transcript).unwrap(), None);

        let mixed = analyze_text("ACGTU").unwrap();
        assert!(mixed.transform_fasta(TransformKind::Complement).is_err());
    }

    #[test]
    fn test_input_fasta_round_trip() {
        let result = analyze_text(">amplicon test plasmid\nAATTGGCC\n").unwrap();
        assert_eq!(result.input_fasta(), ">amplicon test plasmid\nAATTGGCC\n");

        let anon = analyze_text("ACGT").unwrap();
        assert_eq!(anon.input_fasta(), ">sequence\nACGT\n");
    }

    #[test]
    fn test_html_report_escapes_header_text() {
        let result = analyze_text(">amplicon<1> x&y\nACGT\n").unwrap();
        let html = result.html_report();
        assert!(html.contains("<span class=\"key\">Name:</span> amplicon&lt;1&gt; x&amp;y"));
        assert!(!html.contains("amplicon<1>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
