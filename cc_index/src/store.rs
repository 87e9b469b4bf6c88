//! Read and write for the persisted dictionary store.
//!
//! The store is a single JSON document mapping component id to its attribute
//! record, produced offline by the builder from raw definition dumps.
//! Identifiers are upper-cased on the way in.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};

use log::debug;

use crate::data::IndexRecord;
use crate::error::Error;

pub fn read_store(path: &str) -> Result<HashMap<String, IndexRecord>, Error> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let raw: HashMap<String, IndexRecord> = serde_json::from_reader(reader)?;

    let mut records = HashMap::with_capacity(raw.len());
    for (id, record) in raw {
        records.insert(id.to_uppercase(), record);
    }

    debug!("read {} records from {}", records.len(), path);
    Ok(records)
}

pub fn write_store(path: &str, records: &HashMap<String, IndexRecord>) -> Result<(), Error> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer(writer, records)?;
    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::data::AttributeValue;

    #[test]
    fn store_write_and_read() {
        let path = "/tmp/cc_index_store_rw.json";

        let mut record = IndexRecord::new();
        record.set("name", AttributeValue::text("adenosine triphosphate"));
        record.set("formulaWeight", AttributeValue::number(507.18));
        record.type_counts.insert("C".to_string(), 10);
        record.type_counts.insert("N".to_string(), 5);

        let mut records = HashMap::new();
        records.insert("atp".to_string(), record.clone());
        write_store(path, &records).unwrap();

        let read = read_store(path).unwrap();
        assert_eq!(read.len(), 1);
        // Identifiers come back upper-cased.
        assert_eq!(read.get("ATP"), Some(&record));
    }

    #[test]
    fn missing_store_is_an_error() {
        assert!(read_store("/tmp/no_such_cc_store.json").is_err());
    }

    #[test]
    fn corrupt_store_is_an_error() {
        let path = "/tmp/cc_index_store_corrupt.json";
        std::fs::write(path, "{ not json").unwrap();
        assert!(read_store(path).is_err());
    }
}
