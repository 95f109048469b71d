use std::env;
use houseboosts::prelude::*;
use houseboosts::{HousingData, Logger};
use houseboosts::preprocessing::{policy, Imputer};


fn fixture() -> HousingData {
    let mut train = env::current_dir().unwrap();
    train.push("tests/dataset/train.csv");
    let mut test = env::current_dir().unwrap();
    test.push("tests/dataset/test.csv");

    let config = PipelineConfig::default().verbose(false);
    HousingData::load(train, test, &config).unwrap()
}


fn labels(table: &Table, name: &str) -> Vec<String> {
    table.column(name).unwrap()
        .as_categorical()
        .unwrap()
        .iter()
        .map(|v| v.clone().unwrap())
        .collect()
}


/// Tests for `Imputer`.
#[cfg(test)]
pub mod imputation {
    use super::*;

    #[test]
    fn no_missing_value_remains() {
        let mut data = fixture();
        let before = data.features.clone();
        let logger = Logger::silent();
        let report = Imputer::new(&logger)
            .impute(&mut data.features)
            .unwrap();

        assert!(data.features.missing_counts().is_empty());
        assert!(!report.missing_before.is_empty());
        assert_eq!(before.shape(), data.features.shape());

        for name in policy::ZERO_FILL {
            let Some(column) = before.get(name) else { continue; };
            let filled = data.features.column(name).unwrap()
                .dense_values()
                .unwrap();
            for row in 0..column.len() {
                if !column.is_missing(row) { continue; }
                let result = filled[row];
                assert_eq!(0.0, result, "expected 0, got {result}.");
            }
        }

        for name in policy::NONE_FILL {
            let Some(column) = before.get(name) else { continue; };
            let filled = labels(&data.features, name);
            for row in 0..column.len() {
                if !column.is_missing(row) { continue; }
                let result = filled[row].as_str();
                assert_eq!(
                    policy::NONE_LABEL, result,
                    "expected {}, got {result}.", policy::NONE_LABEL
                );
            }
        }
    }


    #[test]
    fn dwelling_class_becomes_categorical() {
        let mut table = Table::new(vec![
            Column::numeric("MSSubClass", [Some(20.0), None, Some(60.0)]),
        ]).unwrap();
        let logger = Logger::silent();
        Imputer::new(&logger).impute(&mut table).unwrap();

        let column = table.column("MSSubClass").unwrap();
        assert!(!column.is_numeric());
        let result = labels(&table, "MSSubClass");
        let expect = vec!["20", "Unknown", "60"];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");
    }


    #[test]
    fn zoning_is_filled_within_dwelling_class() {
        let mut table = Table::new(vec![
            Column::dense("MSSubClass", [20.0, 20.0, 20.0, 60.0, 60.0, 60.0]),
            Column::categorical(
                "MSZoning",
                [Some("RL"), Some("RL"), None, Some("RM"), None, Some("RM")],
            ),
        ]).unwrap();
        let logger = Logger::silent();
        let report = Imputer::new(&logger).impute(&mut table).unwrap();

        let result = labels(&table, "MSZoning");
        let expect = vec!["RL", "RL", "RL", "RM", "RM", "RM"];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");
        assert_eq!(2, report.filled("MSZoning"));
    }


    #[test]
    fn frontage_is_filled_by_neighborhood_median() {
        let mut table = Table::new(vec![
            Column::categorical(
                "Neighborhood",
                [Some("A"), Some("A"), Some("A"), Some("B"), Some("B")],
            ),
            Column::numeric(
                "LotFrontage",
                [Some(60.0), Some(80.0), None, Some(100.0), None],
            ),
        ]).unwrap();
        let logger = Logger::silent();
        Imputer::new(&logger).impute(&mut table).unwrap();

        let result = table.column("LotFrontage").unwrap()
            .dense_values()
            .unwrap();
        let expect = vec![60.0, 80.0, 70.0, 100.0, 100.0];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");
    }


    #[test]
    fn empty_group_fails() {
        let mut table = Table::new(vec![
            Column::categorical(
                "Neighborhood", [Some("A"), Some("B"), Some("B")],
            ),
            Column::numeric("LotFrontage", [None, Some(50.0), Some(70.0)]),
        ]).unwrap();
        let logger = Logger::silent();
        let result = Imputer::new(&logger).impute(&mut table);

        match result {
            Err(PipelineError::EmptyGroup { column, group, .. }) => {
                assert_eq!("LotFrontage", column);
                assert_eq!("A", group);
            },
            other => panic!("expected EmptyGroup, got {other:?}."),
        }
    }


    #[test]
    fn mode_ties_break_to_smallest() {
        let mut table = Table::new(vec![
            Column::categorical(
                "KitchenQual",
                [Some("TA"), Some("Gd"), Some("TA"), Some("Gd"), None],
            ),
        ]).unwrap();
        let logger = Logger::silent();
        Imputer::new(&logger).impute(&mut table).unwrap();

        let result = labels(&table, "KitchenQual").pop().unwrap();
        assert_eq!("Gd", result, "expected Gd, got {result}.");
    }


    #[test]
    fn alley_and_areas() {
        let mut table = Table::new(vec![
            Column::categorical("Alley", [None, Some("Grvl")]),
            Column::dense("LotArea", [8450.7, 9600.2]),
            Column::numeric("MasVnrArea", [None, Some(196.9)]),
        ]).unwrap();
        let logger = Logger::silent();
        Imputer::new(&logger).impute(&mut table).unwrap();

        let result = labels(&table, "Alley");
        let expect = vec!["Pave", "Grvl"];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");

        let result = table.column("LotArea").unwrap().dense_values().unwrap();
        let expect = vec![8450.0, 9600.0];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");

        let result = table.column("MasVnrArea").unwrap().dense_values().unwrap();
        let expect = vec![0.0, 196.0];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");
    }


    #[test]
    fn unlisted_columns_fall_back_on_type() {
        let mut table = Table::new(vec![
            Column::numeric("Mystery", [Some(3.0), None]),
            Column::categorical("Label", [Some("x"), None]),
        ]).unwrap();
        let logger = Logger::silent();
        Imputer::new(&logger).impute(&mut table).unwrap();

        let result = table.column("Mystery").unwrap().dense_values().unwrap();
        assert_eq!(vec![3.0, 0.0], result);
        let result = labels(&table, "Label");
        assert_eq!(vec!["x", "x"], result);
    }
}
