use std::collections::HashMap;

use proptest::prelude::*;
use shelf_catalog::{BookCopy, Catalog, Condition, CopyId, Edition, ErrorKind, Location};

/// An operation applied to the catalog under test
#[derive(Debug, Clone)]
enum Op {
    Acquire(usize),
    Checkout(usize),
    Checkin(usize),
    Lose(usize),
    WriteOff(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..4usize).prop_map(Op::Acquire),
        any::<usize>().prop_map(Op::Checkout),
        any::<usize>().prop_map(Op::Checkin),
        any::<usize>().prop_map(Op::Lose),
        any::<usize>().prop_map(Op::WriteOff),
    ]
}

fn library_editions() -> Vec<Edition> {
    [
        ("Dune", vec!["Herbert"], 1965),
        ("Moby Dick", vec!["Melville"], 1851),
        ("Moby Dick", vec!["Melville"], 2001),
        ("Good Omens", vec!["Pratchett", "Gaiman"], 1990),
    ]
    .into_iter()
    .filter_map(|(title, authors, year)| Edition::new(title, authors, year).ok())
    .collect()
}

fn pick(copies: &[BookCopy], idx: usize) -> Option<&BookCopy> {
    idx.checked_rem(copies.len()).and_then(|i| copies.get(i))
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{0,12}"
}

proptest! {
    #[test]
    fn valid_editions_keep_their_fields(
        title in name_strategy(),
        authors in prop::collection::vec(name_strategy(), 1..4),
        year in 0..3000i32,
    ) {
        let edition = Edition::new(title.clone(), authors.clone(), year);
        prop_assert!(edition.is_ok());
        if let Ok(edition) = edition {
            prop_assert_eq!(edition.title(), title.as_str());
            prop_assert_eq!(edition.authors(), authors.as_slice());
            prop_assert_eq!(i64::from(edition.year()), i64::from(year));
        }
    }

    #[test]
    fn negative_years_are_rejected(year in i32::MIN..0) {
        let result = Edition::new("Dune", ["Herbert"], year);
        prop_assert_eq!(result.map_err(|e| e.kind()).err(), Some(ErrorKind::InvalidArgument));
    }

    #[test]
    fn catalog_matches_model(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let editions = library_editions();
        let catalog = Catalog::new();
        let mut copies: Vec<BookCopy> = Vec::new();
        let mut model: HashMap<CopyId, Location> = HashMap::new();

        for op in ops {
            match op {
                Op::Acquire(idx) => {
                    if let Some(edition) = editions.get(idx) {
                        let copy = catalog.acquire(edition);
                        model.insert(copy.id(), Location::Available);
                        copies.push(copy);
                    }
                }
                Op::Checkout(idx) => {
                    let Some(copy) = pick(&copies, idx) else { continue };
                    let expected_ok = model.get(&copy.id()) == Some(&Location::Available);
                    prop_assert_eq!(catalog.checkout(copy).is_ok(), expected_ok);
                    if expected_ok {
                        model.insert(copy.id(), Location::CheckedOut);
                    }
                }
                Op::Checkin(idx) => {
                    let Some(copy) = pick(&copies, idx) else { continue };
                    let expected_ok = model.get(&copy.id()) == Some(&Location::CheckedOut);
                    prop_assert_eq!(catalog.checkin(copy).is_ok(), expected_ok);
                    if expected_ok {
                        model.insert(copy.id(), Location::Available);
                    }
                }
                Op::Lose(idx) => {
                    let Some(copy) = pick(&copies, idx) else { continue };
                    prop_assert!(catalog.lose(copy).is_ok());
                    prop_assert_eq!(copy.condition(), Condition::Lost);
                }
                Op::WriteOff(idx) => {
                    let Some(copy) = pick(&copies, idx) else { continue };
                    let lost = copy.condition() == Condition::Lost;
                    prop_assert_eq!(catalog.write_off(copy).is_ok(), lost);
                    if lost {
                        model.insert(copy.id(), Location::Missing);
                    }
                }
            }

            let available = catalog.available();
            let checked_out = catalog.checked_out();
            for copy in &available {
                prop_assert!(!checked_out.contains(copy));
            }
            for copy in &copies {
                let location = catalog.location(copy);
                prop_assert_eq!(location.as_ref(), model.get(&copy.id()));
            }
        }
    }

    #[test]
    fn find_is_newest_first(picks in prop::collection::vec(0..4usize, 1..20), query_idx in 0..4usize) {
        let editions = library_editions();
        let catalog = Catalog::new();
        for idx in picks {
            if let Some(edition) = editions.get(idx) {
                catalog.acquire(edition);
            }
        }

        let queries = ["Dune", "Moby Dick", "Melville", "Gaiman"];
        let query = queries.get(query_idx).copied().unwrap_or("Dune");
        let found = catalog.find(query);

        for pair in found.windows(2) {
            if let [newer, older] = pair {
                prop_assert!(newer.year() >= older.year());
                prop_assert_ne!(newer, older);
            }
        }
        for edition in &found {
            prop_assert!(edition.title() == query || edition.authors().iter().any(|a| a == query));
        }
    }
}
