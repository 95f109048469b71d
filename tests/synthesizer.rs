use houseboosts::prelude::*;
use houseboosts::{HousingData, Logger};
use houseboosts::preprocessing::{FeatureSynthesizer, Imputer, DERIVED_FEATURES};


fn values(table: &Table, name: &str) -> Vec<f64> {
    table.column(name).unwrap()
        .dense_values()
        .unwrap()
}


/// Tests for `FeatureSynthesizer`.
#[cfg(test)]
pub mod synthesizer {
    use super::*;

    #[test]
    fn garage_scenario() {
        let train = Table::new(vec![
            Column::numeric("GarageArea", [Some(0.0), None, Some(5.0)]),
            Column::dense("SalePrice", [10.0, 12.0, 20.0]),
        ]).unwrap();
        let test = Table::new(vec![
            Column::dense("GarageArea", [3.0]),
        ]).unwrap();
        let config = PipelineConfig::default().verbose(false);
        let mut data = HousingData::from_tables(train, test, &config).unwrap();

        let logger = Logger::silent();
        Imputer::new(&logger).impute(&mut data.features).unwrap();
        let result = values(&data.features, "GarageArea");
        let expect = vec![0.0, 0.0, 5.0, 3.0];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");

        let appended = FeatureSynthesizer::new(&logger)
            .synthesize(&mut data.features)
            .unwrap();
        assert_eq!(vec!["hasgarage".to_string()], appended);

        let result = values(&data.features, "hasgarage");
        let expect = vec![0.0, 0.0, 1.0, 1.0];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");
    }


    #[test]
    fn sums_and_indicators() {
        let mut table = Table::new(vec![
            Column::dense("FullBath", [2.0, 1.0]),
            Column::dense("HalfBath", [1.0, 0.0]),
            Column::dense("BsmtFullBath", [1.0, 0.0]),
            Column::dense("BsmtHalfBath", [1.0, 0.0]),
            Column::dense("TotalBsmtSF", [800.0, 0.0]),
            Column::dense("1stFlrSF", [900.0, 1000.0]),
            Column::dense("2ndFlrSF", [0.0, 500.0]),
        ]).unwrap();
        let logger = Logger::silent();
        let appended = FeatureSynthesizer::new(&logger)
            .synthesize(&mut table)
            .unwrap();

        let expect = vec!["TotalSF", "Total_Bathrooms", "has2ndfloor", "hasbsmt"];
        assert_eq!(expect, appended, "expected {expect:?}, got {appended:?}.");

        let result = values(&table, "Total_Bathrooms");
        let expect = vec![4.0, 1.0];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");

        let result = values(&table, "TotalSF");
        let expect = vec![1700.0, 1500.0];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");

        let result = values(&table, "has2ndfloor");
        assert_eq!(vec![0.0, 1.0], result);
        let result = values(&table, "hasbsmt");
        assert_eq!(vec![1.0, 0.0], result);
    }


    #[test]
    fn existing_columns_are_untouched() {
        let mut table = Table::new(vec![
            Column::dense("PoolArea", [0.0, 512.0]),
            Column::dense("Fireplaces", [2.0, 0.0]),
        ]).unwrap();
        let before = table.clone();
        let logger = Logger::silent();
        FeatureSynthesizer::new(&logger).synthesize(&mut table).unwrap();

        assert_eq!(4, table.shape().1);
        for column in before.columns() {
            let result = table.column(column.name()).unwrap();
            assert_eq!(column, result);
        }
        assert_eq!(vec![1.0, 0.0], values(&table, "hasfireplace"));
        assert_eq!(vec![0.0, 1.0], values(&table, "haspool"));
    }


    #[test]
    fn ten_derived_features() {
        assert_eq!(10, DERIVED_FEATURES.len());
    }
}
