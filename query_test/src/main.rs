//! Smoke and timing runs for every query class against a built store.

use std::time::Instant;

use log::info;
use rand::seq::SliceRandom;

use cc_index::data::Scalar;
use cc_index::formula::parse_formula_input;
use cc_index::index::SearchIndex;
use cc_index::similarity::DistanceKind;

fn main() {
    env_logger::init();

    let store_path = std::env::args().nth(1).expect("No store path specified");

    let start = Instant::now();
    let index = SearchIndex::load(&store_path);
    info!("loaded {} records in {:.3} seconds", index.len(), start.elapsed().as_secs_f64());

    if index.is_empty() {
        panic!("Index is empty, nothing to query");
    }

    point_lookups(&index);
    scans(&index);
    formula_scans(&index);
}

fn point_lookups(index: &SearchIndex) {
    let ids = index.ids();
    let mut rng = rand::thread_rng();
    let sample: Vec<_> = ids.choose_multiple(&mut rng, 5).collect();

    let start = Instant::now();
    for id in sample.iter() {
        let name = index.get_value(id, "name");
        info!("{}: name {:?} typeCounts {:?}", id, name, index.type_counts(id));
    }
    info!("{} point lookups: {:.6} seconds", sample.len(), start.elapsed().as_secs_f64());
}

fn scans(index: &SearchIndex) {
    let start = Instant::now();
    let hits = index.search_substring("ine", "name");
    info!("substring scan: {} hits in {:.4} seconds", hits.len(), start.elapsed().as_secs_f64());

    let start = Instant::now();
    let hits = index.search_range("100 400", "formulaWeight");
    info!("range scan: {} hits in {:.4} seconds", hits.len(), start.elapsed().as_secs_f64());

    let start = Instant::now();
    let hits = index.search_exact(&Scalar::from("water"), "name");
    info!("exact scan: {} hits in {:.4} seconds", hits.len(), start.elapsed().as_secs_f64());

    for kind in [DistanceKind::Jaro, DistanceKind::JaroWinkler, DistanceKind::Levenshtein] {
        let start = Instant::now();
        let hits = index.search_edit_distance("adenosine", "name", kind);
        info!("{:?} scan: {} hits in {:.4} seconds", kind, hits.len(), start.elapsed().as_secs_f64());
    }
}

fn formula_scans(index: &SearchIndex) {
    let (normalized, counts) = parse_formula_input("C16 O2");
    info!("formula target {:?} -> {:?}", normalized, counts);

    let start = Instant::now();
    let hits = index.search_formula_exact(&counts, false);
    info!("formula exact: {} hits in {:.4} seconds", hits.len(), start.elapsed().as_secs_f64());

    let start = Instant::now();
    let hits = index.search_formula_subset(&counts, false);
    info!("formula subset: {} hits in {:.4} seconds", hits.len(), start.elapsed().as_secs_f64());

    let start = Instant::now();
    let hits = index.search_formula_bounded(&counts, 2, 2, false);
    info!("formula bounded: {} hits in {:.4} seconds", hits.len(), start.elapsed().as_secs_f64());
}
