use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use houseboosts::TableReader;


const FAST_CONFIG: &str = r#"{
    "verbose": true,
    "boosting": { "n_estimators": [20], "max_depth": 3 },
    "linear": { "lasso_max_iter": 10000, "elastic_net_max_iter": 10000 }
}"#;


fn dataset(name: &str) -> PathBuf {
    let mut path = env::current_dir().unwrap();
    path.push("tests/dataset");
    path.push(name);
    path
}


fn temp_file(name: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("houseboosts_cli_{}_{name}", std::process::id()));
    path
}


/// Tests for the `houseboosts` binary.
#[cfg(test)]
pub mod cli {
    use super::*;

    #[test]
    fn writes_a_submission() {
        let config = temp_file("config.json");
        fs::write(&config, FAST_CONFIG).unwrap();
        let output = temp_file("submission.csv");

        let result = Command::new(env!("CARGO_BIN_EXE_houseboosts"))
            .arg("--train").arg(dataset("train.csv"))
            .arg("--test").arg(dataset("test.csv"))
            .arg("--config").arg(&config)
            .arg("--output").arg(&output)
            .arg("--quiet")
            .output()
            .unwrap();
        let stderr = String::from_utf8_lossy(&result.stderr);
        assert!(result.status.success(), "expected success, got {stderr}.");

        let stdout = String::from_utf8_lossy(&result.stdout);
        assert!(stdout.contains("Train RMSE"), "got {stdout}.");
        assert!(!stdout.contains("MISSING VALUES"), "got {stdout}.");

        let table = TableReader::new().file(&output).read().unwrap();
        assert_eq!(vec!["Id", "SalePrice"], table.column_names());
        assert_eq!(20, table.n_rows());

        let _ = fs::remove_file(config);
        let _ = fs::remove_file(output);
    }


    #[test]
    fn missing_input_exits_with_an_error() {
        let result = Command::new(env!("CARGO_BIN_EXE_houseboosts"))
            .arg("--train").arg(dataset("no_such_file.csv"))
            .arg("--test").arg(dataset("test.csv"))
            .arg("--quiet")
            .output()
            .unwrap();

        assert_eq!(Some(1), result.status.code());
        let stderr = String::from_utf8_lossy(&result.stderr);
        assert!(stderr.contains("error:"), "got {stderr}.");
    }
}
