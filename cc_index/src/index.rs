//! Query operations over the in-memory component index.
//!
//! Every search is a linear scan of the loaded records. Scans never fail:
//! a record that cannot be evaluated against the query (missing attribute,
//! non-numeric value in a range search) is skipped and the scan continues.

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, error, info};

use crate::data::{AttributeValue, ElementCounts, IndexRecord, Scalar};
use crate::error::Error;
use crate::formula::{is_hydrogen_isotope, normalize_counts};
use crate::similarity::DistanceKind;
use crate::store;

/// One projected result row: display name paired with the attribute value,
/// in caller-requested column order.
pub type Row = Vec<(String, AttributeValue)>;

/// The in-memory component index.
///
/// Built once from the persisted dictionary store and immutable afterwards;
/// all queries take `&self`, so a shared index is safe for concurrent
/// readers. Refreshing against an updated store means loading a new index
/// and swapping the reference (e.g. an `Arc`) held by the caller.
#[derive(Debug, Default)]
pub struct SearchIndex {
    records: HashMap<String, IndexRecord>,
}

impl SearchIndex {
    /// Load the index from a persisted dictionary store.
    ///
    /// A missing or corrupt store yields an empty index, logged at error
    /// level. Callers treat an empty index as "unavailable" and report no
    /// results rather than failing.
    pub fn load(store_path: &str) -> Self {
        match store::read_store(store_path) {
            Ok(records) => {
                info!("loaded {} component records from {}", records.len(), store_path);
                Self { records }
            }
            Err(e) => {
                error!("index unavailable, cannot read store {}: {}", store_path, e);
                Self { records: HashMap::new() }
            }
        }
    }

    pub fn from_records(records: HashMap<String, IndexRecord>) -> Self {
        let mut normalized = HashMap::with_capacity(records.len());
        for (id, record) in records {
            normalized.insert(id.to_uppercase(), record);
        }
        Self { records: normalized }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    /// Point lookup. `None` for an unknown id or an attribute absent from
    /// that record; never an error.
    pub fn get_value(&self, id: &str, attribute: &str) -> Option<&AttributeValue> {
        self.records.get(&id.to_uppercase())?.attributes.get(attribute)
    }

    /// Point lookup for the derived element count table.
    pub fn type_counts(&self, id: &str) -> Option<&ElementCounts> {
        self.records.get(&id.to_uppercase()).map(|r| &r.type_counts)
    }

    /// Project the named attributes for each input id into display rows.
    ///
    /// `source_attrs` and `display_names` are equal-length parallel lists;
    /// row order follows `ids`. Callers guarantee every id is present:
    /// the first unknown id fails the whole call with `Error::UnknownId`.
    /// An attribute absent from a present record is an ordinary lookup
    /// miss; that column is omitted from the row.
    pub fn attribute_rows(
        &self,
        ids: &[String],
        source_attrs: &[String],
        display_names: &[String],
    ) -> Result<Vec<Row>, Error> {
        if source_attrs.len() != display_names.len() {
            return Err(Error::MismatchedProjection {
                sources: source_attrs.len(),
                displays: display_names.len(),
            });
        }
        debug!("projecting {} attributes for {} ids over index of {}", source_attrs.len(), ids.len(), self.records.len());

        let mut rows: Vec<Row> = Vec::with_capacity(ids.len());
        for id in ids {
            let key = id.to_uppercase();
            let record = self.records.get(&key).ok_or_else(|| Error::UnknownId(key.clone()))?;

            let mut row: Row = Vec::with_capacity(source_attrs.len());
            for (attr, display) in source_attrs.iter().zip(display_names.iter()) {
                match record.attributes.get(attr) {
                    Some(value) => row.push((display.clone(), value.clone())),
                    None => debug!("id {} has no attribute {:?}, column omitted", key, attr),
                }
            }
            rows.push(row);
        }

        Ok(rows)
    }

    /// Exact-match scan. Scalar values compare type-sensitively; sequence
    /// values match if any element equals the target.
    pub fn search_exact(&self, target: &Scalar, attribute: &str) -> Vec<String> {
        let start = Instant::now();
        let mut id_list: Vec<String> = Vec::new();

        for (id, record) in self.records.iter() {
            let value = match record.attributes.get(attribute) {
                Some(v) => v,
                None => continue,
            };
            let hit = match value {
                AttributeValue::Scalar(s) => s == target,
                AttributeValue::Sequence(items) => items.iter().any(|s| s == target),
            };
            if hit {
                id_list.push(id.clone());
            }
        }

        debug!(
            "exact search {:?} on {:?} matched {} in {:.4} seconds",
            target, attribute, id_list.len(), start.elapsed().as_secs_f64()
        );
        id_list
    }

    /// Substring scan, case-sensitive, over the natural string form of the
    /// value. A record missing the attribute behaves as the empty string
    /// and never matches a non-empty target.
    pub fn search_substring(&self, target: &str, attribute: &str) -> Vec<String> {
        let start = Instant::now();
        let mut id_list: Vec<String> = Vec::new();

        for (id, record) in self.records.iter() {
            let value = match record.attributes.get(attribute) {
                Some(v) => v,
                None => continue,
            };
            let hit = match value {
                AttributeValue::Scalar(s) => s.as_string().contains(target),
                AttributeValue::Sequence(items) => items.iter().any(|s| s.as_string().contains(target)),
            };
            if hit {
                id_list.push(id.clone());
            }
        }

        debug!(
            "substring search {:?} on {:?} matched {} in {:.4} seconds",
            target, attribute, id_list.len(), start.elapsed().as_secs_f64()
        );
        id_list
    }

    /// Numeric range scan over a whitespace-separated "low high" pair.
    /// Inclusion is `low <= value < high`. Records whose value has no
    /// numeric form are skipped; an unparseable range yields no matches.
    pub fn search_range(&self, target_range: &str, attribute: &str) -> Vec<String> {
        let mut bounds = target_range.split_whitespace();
        let low = bounds.next().and_then(|t| t.parse::<f64>().ok());
        let high = bounds.next().and_then(|t| t.parse::<f64>().ok());
        let (low, high) = match (low, high) {
            (Some(low), Some(high)) => (low, high),
            _ => {
                info!("unusable range {:?} for attribute {:?}", target_range, attribute);
                return Vec::new();
            }
        };

        let start = Instant::now();
        let mut id_list: Vec<String> = Vec::new();

        for (id, record) in self.records.iter() {
            let value = match record.attributes.get(attribute).and_then(AttributeValue::as_f64) {
                Some(v) => v,
                None => {
                    debug!("conversion failure for {:?} on {}", attribute, id);
                    continue;
                }
            };
            if low <= value && value < high {
                id_list.push(id.clone());
            }
        }

        debug!(
            "range search {:?} on {:?} matched {} in {:.4} seconds",
            target_range, attribute, id_list.len(), start.elapsed().as_secs_f64()
        );
        id_list
    }

    /// Group every id by its own value for `attribute`: each entry maps an
    /// id to the ids sharing its value, the id itself always included.
    /// Records without a scalar value for the attribute are skipped.
    pub fn search_all(&self, attribute: &str) -> HashMap<String, Vec<String>> {
        let start = Instant::now();
        let mut groups: HashMap<String, Vec<String>> = HashMap::new();

        for (id, record) in self.records.iter() {
            let value = match record.attributes.get(attribute) {
                Some(AttributeValue::Scalar(s)) => s.clone(),
                _ => {
                    debug!("skipping {} in global scan of {:?}", id, attribute);
                    continue;
                }
            };
            let matches = self.search_exact(&value, attribute);
            if !matches.is_empty() {
                groups.insert(id.clone(), matches);
            }
        }

        info!(
            "global scan of {:?} grouped {} ids in {:.4} seconds",
            attribute, groups.len(), start.elapsed().as_secs_f64()
        );
        groups
    }

    /// Approximate-string scan with the default cutoff for `kind`.
    pub fn search_edit_distance(&self, target: &str, attribute: &str, kind: DistanceKind) -> Vec<String> {
        self.search_edit_distance_with_cutoff(target, attribute, kind, kind.default_cutoff())
    }

    /// Approximate-string scan. For sequence values the first element whose
    /// score exceeds the cutoff scores the record. Ids come back ordered by
    /// descending similarity; the scores themselves are not returned.
    pub fn search_edit_distance_with_cutoff(
        &self,
        target: &str,
        attribute: &str,
        kind: DistanceKind,
        cutoff: f64,
    ) -> Vec<String> {
        let start = Instant::now();
        let mut scored: Vec<(String, f64)> = Vec::new();

        for (id, record) in self.records.iter() {
            let value = match record.attributes.get(attribute) {
                Some(v) => v,
                None => continue,
            };
            let score = match value {
                AttributeValue::Scalar(s) => {
                    let score = kind.similarity(target, &s.as_string());
                    if score > cutoff { Some(score) } else { None }
                }
                AttributeValue::Sequence(items) => {
                    let mut found = None;
                    for item in items {
                        let score = kind.similarity(target, &item.as_string());
                        if score > cutoff {
                            found = Some(score);
                            break;
                        }
                    }
                    found
                }
            };
            if let Some(score) = score {
                scored.push((id.clone(), score));
            }
        }

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        debug!(
            "{:?} similarity search {:?} on {:?} matched {} in {:.4} seconds",
            kind, target, attribute, scored.len(), start.elapsed().as_secs_f64()
        );
        scored.into_iter().map(|(id, _)| id).collect()
    }

    /// Exact formula match: identical element sets and counts, with H/D/T
    /// removed from both sides when `exclude_h` is set.
    pub fn search_formula_exact(&self, element_counts: &ElementCounts, exclude_h: bool) -> Vec<String> {
        let mut id_list: Vec<String> = Vec::new();
        if element_counts.is_empty() {
            return id_list;
        }
        let start = Instant::now();
        let target = normalize_counts(element_counts, exclude_h);

        for (id, record) in self.records.iter() {
            if record.type_counts.is_empty() {
                continue;
            }
            let reference = normalize_counts(&record.type_counts, exclude_h);
            if reference == target {
                id_list.push(id.clone());
            }
        }

        info!(
            "formula exact match list length {} ({:.3} seconds)",
            id_list.len(), start.elapsed().as_secs_f64()
        );
        id_list
    }

    /// Subset formula match: every target element present in the record
    /// with an identical count; record-only elements are unconstrained.
    pub fn search_formula_subset(&self, element_counts: &ElementCounts, exclude_h: bool) -> Vec<String> {
        let mut id_list: Vec<String> = Vec::new();
        if element_counts.is_empty() {
            return id_list;
        }
        let start = Instant::now();

        for (id, record) in self.records.iter() {
            let reference = &record.type_counts;
            if reference.is_empty() {
                continue;
            }

            let mut matched = true;
            for (symbol, count) in element_counts.iter() {
                let symbol = symbol.to_uppercase();
                if exclude_h && is_hydrogen_isotope(&symbol) {
                    continue;
                }
                match reference.get(&symbol) {
                    Some(ref_count) if ref_count == count => {}
                    _ => {
                        matched = false;
                        break;
                    }
                }
            }
            if matched {
                id_list.push(id.clone());
            }
        }

        info!(
            "formula subset match list length {} ({:.3} seconds)",
            id_list.len(), start.elapsed().as_secs_f64()
        );
        id_list
    }

    /// Bounded formula match: every target element present in the record
    /// with a count within `[target - lower_offset, target + upper_offset]`
    /// inclusive. An element absent from the record excludes it.
    pub fn search_formula_bounded(
        &self,
        element_counts: &ElementCounts,
        upper_offset: u32,
        lower_offset: u32,
        exclude_h: bool,
    ) -> Vec<String> {
        let mut id_list: Vec<String> = Vec::new();
        if element_counts.is_empty() {
            return id_list;
        }
        let start = Instant::now();

        for (id, record) in self.records.iter() {
            let reference = &record.type_counts;
            if reference.is_empty() {
                continue;
            }

            let mut matched = true;
            for (symbol, count) in element_counts.iter() {
                let symbol = symbol.to_uppercase();
                if exclude_h && is_hydrogen_isotope(&symbol) {
                    continue;
                }
                let ref_count = match reference.get(&symbol) {
                    Some(c) => *c as i64,
                    None => {
                        matched = false;
                        break;
                    }
                };
                let count = *count as i64;
                if ref_count < count - lower_offset as i64 || ref_count > count + upper_offset as i64 {
                    matched = false;
                    break;
                }
            }
            if matched {
                id_list.push(id.clone());
            }
        }

        info!(
            "formula bounded match list length {} ({:.3} seconds)",
            id_list.len(), start.elapsed().as_secs_f64()
        );
        id_list
    }
}
