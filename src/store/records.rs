//! Provides the `RecordStore`, an in-memory collection of `StateRecord`s.
//!
//! Includes capabilities for loading records from the states file, listing them
//! alphabetically, case-insensitive lookup by name, ranking by population and
//! replacing a state's population in place.

use crate::error::{AppError, Result};
use crate::models::{PopulationEntry, StateRecord};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, error, info};

/// Holds every state record for the lifetime of the session.
///
/// Records keep file order until the first call to `list_sorted` or
/// `replace_population`, both of which sort the collection in place.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<StateRecord>,
}

impl RecordStore {
    /// Loads the store from the states file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be opened or read, and
    /// `AppError::MalformedRecord` for the first line that does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading states from {}", path.display());

        let file = File::open(path).map_err(|e| {
            error!("Failed to open states file {}: {}", path.display(), e);
            AppError::from(e)
        })?;

        let store = Self::load_from_reader(BufReader::new(file))?;
        info!("Loaded {} states", store.len());
        Ok(store)
    }

    /// Loads the store from any buffered reader, one record per line.
    ///
    /// Blank lines are skipped. Records are kept in the order they appear.
    pub fn load_from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut records = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                debug!(line = index + 1, "Skipping blank line");
                continue;
            }
            records.push(StateRecord::parse_line(index + 1, &line)?);
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in their current order, without sorting.
    #[cfg(test)]
    pub fn records(&self) -> &[StateRecord] {
        &self.records
    }

    /// Sorts the collection alphabetically by state name and returns it.
    ///
    /// The comparison is case-sensitive and the sort is stable.
    pub fn list_sorted(&mut self) -> &[StateRecord] {
        self.records.sort();
        &self.records
    }

    /// Finds the first record whose name matches `query`, ignoring case.
    pub fn find_by_name(&self, query: &str) -> Option<&StateRecord> {
        let found = self.records.iter().find(|r| r.matches_name(query));
        debug!(query, found = found.is_some(), "State lookup");
        found
    }

    /// Sets the population of the named state and restores alphabetical order.
    ///
    /// `name` is matched exactly, as it comes from a record previously returned
    /// by `find_by_name`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::StateNotFound` if no record carries that name.
    pub fn replace_population(&mut self, name: &str, population: u64) -> Result<()> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.name == name)
            .ok_or_else(|| AppError::StateNotFound(name.to_string()))?;

        let previous = record.population;
        record.population = population;
        self.records.sort();

        info!(
            state = name,
            previous, population, "Updated state population"
        );
        Ok(())
    }

    /// Ranks states by population, largest first, and keeps the first `limit`.
    ///
    /// Names are collapsed first (a later duplicate overwrites the population of
    /// an earlier one while keeping its position). The ranking sort is stable, so
    /// ties keep their relative order from the collection.
    pub fn top_populations(&self, limit: usize) -> Vec<PopulationEntry> {
        let mut entries: Vec<PopulationEntry> = Vec::with_capacity(self.records.len());

        for record in &self.records {
            match entries.iter_mut().find(|e| e.name == record.name) {
                Some(existing) => existing.population = record.population,
                None => entries.push(PopulationEntry::new(&record.name, record.population)),
            }
        }

        entries.sort_by(|a, b| b.population.cmp(&a.population));
        entries.truncate(limit);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;
    use std::path::PathBuf;

    const SAMPLE: &str = "\
Texas,Austin,29000000,Bluebonnet,texas.jpg
California,Sacramento,39500000,California Poppy,california.jpg
New York,Albany,19500000,Rose,newyork.jpg
Florida,Tallahassee,21500000,Orange Blossom,florida.jpg
Illinois,Springfield,12700000,Violet,illinois.jpg
Pennsylvania,Harrisburg,12800000,Mountain Laurel,pennsylvania.jpg
";

    fn sample_store() -> RecordStore {
        RecordStore::load_from_reader(Cursor::new(SAMPLE)).unwrap()
    }

    fn names(records: &[StateRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_load_keeps_file_order() {
        let store = sample_store();
        assert_eq!(store.len(), 6);
        assert_eq!(store.records()[0].name, "Texas");
        assert_eq!(store.records()[5].name, "Pennsylvania");
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let data = "\nOhio,Columbus,11689100,Scarlet Carnation,ohio.jpg\n\n   \n";
        let store = RecordStore::load_from_reader(Cursor::new(data)).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_load_reports_malformed_line_number() {
        let data = "Ohio,Columbus,11689100,Scarlet Carnation,ohio.jpg\nUtah,Salt Lake City\n";
        match RecordStore::load_from_reader(Cursor::new(data)) {
            Err(AppError::MalformedRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = RecordStore::load(Path::new("definitely/not/here/states.txt"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_load_bundled_states_file() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("states.txt");
        let mut store = RecordStore::load(&path).unwrap();
        assert_eq!(store.len(), 50);

        let sorted = store.list_sorted();
        assert!(sorted.windows(2).all(|w| w[0].name <= w[1].name));

        let wyoming = store.find_by_name("wyoming").unwrap();
        assert_eq!(wyoming.population, 578803);
    }

    #[test]
    fn test_list_sorted_is_alphabetical_and_complete() {
        let mut store = sample_store();
        let sorted = store.list_sorted();
        assert_eq!(
            names(sorted),
            vec![
                "California",
                "Florida",
                "Illinois",
                "New York",
                "Pennsylvania",
                "Texas"
            ]
        );
    }

    #[test]
    fn test_list_sorted_is_case_sensitive() {
        let data = "alpha,a,1,f,a.jpg\nBeta,b,2,f,b.jpg\n";
        let mut store = RecordStore::load_from_reader(Cursor::new(data)).unwrap();
        // Uppercase letters sort before lowercase ones.
        assert_eq!(names(store.list_sorted()), vec!["Beta", "alpha"]);
    }

    #[rstest]
    #[case("new york")]
    #[case("NEW YORK")]
    #[case("New York")]
    #[case("nEw YoRk")]
    fn test_find_by_name_ignores_case(#[case] query: &str) {
        let store = sample_store();
        let found = store.find_by_name(query).unwrap();
        assert_eq!(found.name, "New York");
        assert_eq!(found.capital, "Albany");
    }

    #[rstest]
    #[case("")]
    #[case("New")]
    #[case("Ohio")]
    fn test_find_by_name_requires_exact_match(#[case] query: &str) {
        assert!(sample_store().find_by_name(query).is_none());
    }

    #[test]
    fn test_find_by_name_first_match_wins() {
        let data = "Texas,Austin,1,a,a.jpg\nTEXAS,Houston,2,b,b.jpg\n";
        let store = RecordStore::load_from_reader(Cursor::new(data)).unwrap();
        assert_eq!(store.find_by_name("texas").unwrap().capital, "Austin");
    }

    #[test]
    fn test_replace_population_updates_and_resorts() {
        let mut store = sample_store();
        store.replace_population("Texas", 600000).unwrap();

        let sorted = store.list_sorted().to_vec();
        assert_eq!(names(&sorted)[5], "Texas");
        assert_eq!(sorted[5].population, 600000);
        assert_eq!(sorted[5].capital, "Austin");
        assert!(sorted.windows(2).all(|w| w[0].name <= w[1].name));
    }

    #[test]
    fn test_replace_population_restores_order_without_listing() {
        let mut store = sample_store();
        store.replace_population("Florida", 1).unwrap();
        assert!(store.records().windows(2).all(|w| w[0].name <= w[1].name));
    }

    #[test]
    fn test_replace_population_is_idempotent() {
        let mut store = sample_store();
        store.replace_population("Illinois", 13000000).unwrap();
        let once = store.records().to_vec();
        store.replace_population("Illinois", 13000000).unwrap();
        assert_eq!(store.records(), once.as_slice());
        assert_eq!(store.find_by_name("illinois").unwrap().population, 13000000);
    }

    #[test]
    fn test_replace_population_unknown_state() {
        let mut store = sample_store();
        let before = store.records().to_vec();
        match store.replace_population("Ohio", 5) {
            Err(AppError::StateNotFound(name)) => assert_eq!(name, "Ohio"),
            other => panic!("Expected StateNotFound, got {:?}", other),
        }
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn test_top_populations_excludes_sixth() {
        let top = sample_store().top_populations(5);
        let ranked: Vec<(&str, u64)> = top.iter().map(|e| (e.name.as_str(), e.population)).collect();
        assert_eq!(
            ranked,
            vec![
                ("California", 39500000),
                ("Texas", 29000000),
                ("Florida", 21500000),
                ("New York", 19500000),
                ("Pennsylvania", 12800000),
            ]
        );
    }

    #[test]
    fn test_top_populations_with_fewer_records() {
        let data = "Ohio,Columbus,11689100,Scarlet Carnation,ohio.jpg\nUtah,Salt Lake City,3205958,Sego Lily,utah.jpg\n";
        let store = RecordStore::load_from_reader(Cursor::new(data)).unwrap();
        let top = store.top_populations(5);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Ohio");
    }

    #[test]
    fn test_top_populations_ties_keep_collection_order() {
        let data = "B,x,10,f,b.jpg\nA,x,10,f,a.jpg\nC,x,20,f,c.jpg\n";
        let store = RecordStore::load_from_reader(Cursor::new(data)).unwrap();
        let top = store.top_populations(5);
        assert_eq!(
            top,
            vec![
                PopulationEntry::new("C", 20),
                PopulationEntry::new("B", 10),
                PopulationEntry::new("A", 10),
            ]
        );
    }

    #[test]
    fn test_top_populations_duplicate_name_last_write_wins() {
        let data = "Texas,Austin,5,f,a.jpg\nOhio,Columbus,7,f,b.jpg\nTexas,Austin,9,f,a.jpg\n";
        let store = RecordStore::load_from_reader(Cursor::new(data)).unwrap();
        let top = store.top_populations(5);
        assert_eq!(
            top,
            vec![PopulationEntry::new("Texas", 9), PopulationEntry::new("Ohio", 7)]
        );
    }
}
