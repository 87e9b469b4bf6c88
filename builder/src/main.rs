//! Offline ingestion: parse raw component definition dumps into the
//! persisted dictionary store the search index loads from.

use std::collections::HashMap;
use std::fs;

use clap::Parser;
use glob::glob;
use kdam::tqdm;
use log::{info, warn};

use cc_index::data::{AttributeValue, IndexRecord};
use cc_index::formula::parse_formula_input;
use cc_index::store;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which task to carry out: build or random
    #[arg(short, long)]
    task: String,

    /// Glob pattern of tab-separated component dump files
    #[arg(short, long)]
    input_pattern: Option<String>,

    /// Output path for the persisted dictionary store
    #[arg(short, long)]
    output_filename: Option<String>,

    /// Number of records for the random task
    #[arg(short, long)]
    num_records: Option<usize>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match args.task.as_str() {
        "build" => build_store(args),
        "random" => build_random(args),
        _ => panic!("Unknown task: {}", args.task),
    }
}

/// Dump line layout, tab separated:
/// id, name, formula, formulaWeight, smiles, InChIKey, InChIKey14, synonyms
/// with synonyms ";"-separated. Lines starting with "#" and the header
/// line are ignored.
fn parse_line(line: &str) -> Result<(String, IndexRecord), String> {
    let fields: Vec<&str> = line.split('\t').collect();

    if fields.len() != 8 {
        return Err(format!("expected 8 fields, found {}", fields.len()));
    }

    let id = fields[0].trim().to_uppercase();
    if id.is_empty() {
        return Err("empty identifier".to_string());
    }

    let weight = fields[3]
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad formulaWeight {:?}: {}", fields[3], e))?;

    let mut record = IndexRecord::new();
    record.set("name", AttributeValue::text(fields[1].trim()));
    record.set("formula", AttributeValue::text(fields[2].trim()));
    record.set("formulaWeight", AttributeValue::number(weight));
    record.set("smiles", AttributeValue::text(fields[4].trim()));
    record.set("InChIKey", AttributeValue::text(fields[5].trim()));
    record.set("InChIKey14", AttributeValue::text(fields[6].trim()));

    let synonyms: Vec<&str> = fields[7]
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if !synonyms.is_empty() {
        record.set("synonyms", AttributeValue::sequence(synonyms));
    }

    let (_, type_counts) = parse_formula_input(fields[2].trim());
    record.type_counts = type_counts;

    Ok((id, record))
}

fn build_store(args: Args) {
    let pattern = args.input_pattern.expect("No input pattern specified");
    let output_filename = args.output_filename.expect("No output filename specified");

    let mut records: HashMap<String, IndexRecord> = HashMap::new();
    let mut skipped: usize = 0;

    for entry in glob(&pattern).expect("Glob failed") {
        let filename = entry.unwrap().into_os_string().into_string().unwrap();
        info!("reading {}", filename);

        let contents = fs::read_to_string(&filename).expect("Dump file can't be read");

        for (i, line) in tqdm!(contents.lines().enumerate()) {
            if line.is_empty() || line.starts_with('#') || line.starts_with("id\t") {
                continue;
            }

            match parse_line(line) {
                Ok((id, record)) => {
                    records.insert(id, record);
                }
                Err(e) => {
                    warn!("{} line {}: {}", filename, i + 1, e);
                    skipped += 1;
                }
            }
        }
    }

    info!("parsed {} records, skipped {} lines", records.len(), skipped);

    store::write_store(&output_filename, &records).expect("Store write failed");
}

fn build_random(args: Args) {
    let output_filename = args.output_filename.expect("No output filename specified");
    let n = args.num_records.unwrap_or(10000);

    let mut records: HashMap<String, IndexRecord> = HashMap::new();
    for _ in tqdm!(0..n) {
        records.insert(IndexRecord::random_id(), IndexRecord::random());
    }

    info!("generated {} random records", records.len());

    store::write_store(&output_filename, &records).expect("Store write failed");
}

#[cfg(test)]
mod tests {

    use super::*;
    use cc_index::data::Scalar;

    #[test]
    fn parse_good_line() {
        let line = "atp\tADENOSINE-5'-TRIPHOSPHATE\tC10 H16 N5 O13 P3\t507.18\tsmiles-here\tZKHQWZAMYRWXGA-KQYNXXCUSA-N\tZKHQWZAMYRWXGA\tATP; H4atp";
        let (id, record) = parse_line(line).unwrap();

        assert_eq!(id, "ATP");
        assert_eq!(record.attributes.get("formulaWeight"), Some(&AttributeValue::number(507.18)));
        assert_eq!(record.type_counts.get("C"), Some(&10));
        assert_eq!(record.type_counts.get("P"), Some(&3));
        assert_eq!(
            record.attributes.get("synonyms"),
            Some(&AttributeValue::Sequence(vec![
                Scalar::from("ATP"),
                Scalar::from("H4atp"),
            ]))
        );
    }

    #[test]
    fn parse_rejects_short_and_unparseable_lines() {
        assert!(parse_line("atp\tonly three\tfields").is_err());

        let bad_weight = "atp\tname\tC10\tnot-a-number\ts\tk\tk14\t";
        assert!(parse_line(bad_weight).is_err());
    }
}
