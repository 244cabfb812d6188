use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use ahash::AHashSet;
use clap::{Arg, ArgAction, Command};
use indicatif::{ProgressBar, ProgressStyle};

use seqanalyzer_rs::batch::analyze_batch;
use seqanalyzer_rs::fasta::{load_sequence, parse_input};
use seqanalyzer_rs::transform::TransformKind;
use seqanalyzer_rs::types::SequenceRecord;

enum ReportFormat {
    Html,
    Text,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let matches = Command::new("seqanalyzer")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Analyzes DNA/RNA sequences: composition, skew, codon usage, and strand transforms")
        .arg(
            Arg::new("inputs")
                .value_name("FASTA")
                .num_args(0..)
                .help("FASTA files to analyze (.fasta/.fa/.fna, optionally .gz); the first record of each is used"),
        )
        .arg(
            Arg::new("text")
                .long("text")
                .short('t')
                .value_name("SEQUENCE")
                .help("Analyze raw or FASTA-formatted text instead of a file"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .value_name("DIR")
                .default_value(".")
                .help("Directory for reports and FASTA exports"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .value_name("FORMAT")
                .default_value("html")
                .help("Report format: html or text"),
        )
        .arg(
            Arg::new("export")
                .long("export")
                .short('e')
                .value_name("TRANSFORM")
                .action(ArgAction::Append)
                .help("Write a transform as FASTA: transcript, complement, or reverse-complement"),
        )
        .arg(
            Arg::new("export-all")
                .long("export-all")
                .action(ArgAction::SetTrue)
                .help("Write all three transforms as FASTA"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Suppress progress output"),
        )
        .get_matches();

    let files: Vec<PathBuf> = matches
        .get_many::<String>("inputs")
        .unwrap_or_default()
        .map(PathBuf::from)
        .collect();
    let pasted = matches.get_one::<String>("text");
    if files.is_empty() && pasted.is_none() {
        return Err("no input given; pass FASTA files and/or --text".into());
    }

    let format = match matches.get_one::<String>("format").map(String::as_str) {
        Some("html") => ReportFormat::Html,
        Some("text") | Some("txt") => ReportFormat::Text,
        other => {
            return Err(format!("unsupported report format '{}'", other.unwrap_or("")).into());
        }
    };

    let mut exports: Vec<TransformKind> = Vec::new();
    if matches.get_flag("export-all") {
        exports.extend(TransformKind::all());
    } else if let Some(wanted) = matches.get_many::<String>("export") {
        for name in wanted {
            exports.push(parse_transform(name)?);
        }
    }

    let quiet = matches.get_flag("quiet");
    let output_dir: PathBuf = matches
        .get_one::<String>("output-dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    // 1. Load every input
    let spinner = phase_spinner(quiet, "blue", "Loading input sequences...");
    let mut inputs: Vec<(String, SequenceRecord)> = Vec::new();
    let mut seen_stems: AHashSet<String> = AHashSet::new();
    let mut failed = 0usize;
    for path in &files {
        match load_sequence(path) {
            Ok(record) => {
                let stem = unique_stem(&mut seen_stems, output_stem(path));
                inputs.push((stem, record));
            }
            Err(e) => {
                failed += 1;
                eprintln!("{}: {}", path.display(), e);
            }
        }
    }
    if let Some(text) = pasted {
        match parse_input(text) {
            Ok(record) => {
                let stem = unique_stem(&mut seen_stems, "sequence".to_string());
                inputs.push((stem, record));
            }
            Err(e) => {
                failed += 1;
                eprintln!("--text: {}", e);
            }
        }
    }
    spinner.finish_with_message(format!("Loaded {} sequence(s).", inputs.len()));

    if inputs.is_empty() {
        return Err("no sequences could be loaded".into());
    }

    // 2. Analyze the whole batch in parallel
    let spinner = phase_spinner(
        quiet,
        "green",
        &format!("Analyzing {} sequence(s)...", inputs.len()),
    );
    let (stems, records): (Vec<String>, Vec<SequenceRecord>) = inputs.into_iter().unzip();
    let results = analyze_batch(records);
    spinner.finish_with_message("Analysis finished.");

    // 3. Write reports and requested exports
    let spinner = phase_spinner(quiet, "yellow", "Writing output files...");
    let mut written = 0usize;
    for (stem, result) in stems.iter().zip(&results) {
        let (report_name, report_text) = match format {
            ReportFormat::Html => (format!("{}_report.html", stem), result.html_report()),
            ReportFormat::Text => (format!("{}_report.txt", stem), result.text_report()),
        };
        fs::write(output_dir.join(report_name), report_text)?;
        written += 1;

        for &kind in &exports {
            match result.transform_fasta(kind) {
                Ok(Some(fasta_text)) => {
                    let name = format!("{}_{}.fasta", stem, kind.label());
                    fs::write(output_dir.join(name), fasta_text)?;
                    written += 1;
                }
                Ok(None) => {
                    eprintln!(
                        "{}: {} not applicable ({} sequence)",
                        stem,
                        kind.label(),
                        result.sequence_type
                    );
                }
                Err(e) => {
                    eprintln!("{}: {} failed: {}", stem, kind.label(), e);
                }
            }
        }
    }
    spinner.finish_with_message(format!("Wrote {} file(s).", written));

    if failed > 0 {
        return Err(format!("{} input(s) failed to load", failed).into());
    }

    // 4. Final message
    let spinner = phase_spinner(quiet, "cyan", "All done!");
    spinner.finish_with_message("All done!");

    Ok(())
}

fn phase_spinner(quiet: bool, color: &str, msg: &str) -> ProgressBar {
    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
            ])
            .template(&format!("{{spinner:.{}}} {{msg}}", color))
            .expect("Invalid spinner template"),
    );
    spinner.set_message(msg.to_string());
    spinner
}

fn parse_transform(name: &str) -> Result<TransformKind, Box<dyn Error>> {
    match name {
        "transcript" | "transcription" | "rna" => Ok(TransformKind::Transcript),
        "complement" => Ok(TransformKind::Complement),
        "reverse-complement" | "reverse_complement" | "revcomp" => {
            Ok(TransformKind::ReverseComplement)
        }
        _ => Err(format!(
            "unknown transform '{}'; expected transcript, complement, or reverse-complement",
            name
        )
        .into()),
    }
}

/// Output file stem for one input: the file name minus `.gz` and FASTA
/// extensions.
fn output_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sequence".to_string());
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    for ext in [".fasta", ".fa", ".fna"] {
        if let Some(stripped) = name.strip_suffix(ext) {
            return stripped.to_string();
        }
    }
    name.to_string()
}

/// Claims `stem` for this run; a name already taken becomes `stem_2`,
/// `stem_3`, and so on, so two inputs never write the same output paths.
fn unique_stem(seen: &mut AHashSet<String>, stem: String) -> String {
    if seen.insert(stem.clone()) {
        return stem;
    }
    let mut n = 2usize;
    loop {
        let candidate = format!("{}_{}", stem, n);
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
