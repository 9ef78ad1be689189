//! Synthetic Iris-style CSV fixtures written to a temporary directory.

use std::fmt::Write;
use std::path::{Path, PathBuf};

/// One CSV row. Species 1 and 2 are well separated on the petal columns.
fn row(i: usize, species: i64) -> String {
    let jitter = (i % 10) as f64 * 0.05;
    let (sl, sw, pl, pw) = match species {
        0 => (5.0 + jitter, 3.4 + jitter, 1.4 + jitter * 0.2, 0.2 + jitter * 0.1),
        1 => (5.9 + jitter, 2.8 + jitter * 0.5, 4.0 + jitter, 1.2 + jitter * 0.4),
        _ => (6.6 + jitter, 3.0 + jitter * 0.5, 5.8 + jitter, 2.1 + jitter * 0.4),
    };
    format!("{:.2},{:.2},{:.2},{:.2},{}", sl, sw, pl, pw, species)
}

/// CSV with `pairs` rows each of species 1 and 2 plus `setosa` rows of species 0.
fn csv(pairs: usize, setosa: usize) -> String {
    let mut out = format!("{},4,setosa,versicolor,virginica\n", 2 * pairs + setosa);
    for i in 0..pairs {
        let _ = writeln!(out, "{}", row(i, 1));
        let _ = writeln!(out, "{}", row(i + 3, 2));
    }
    for i in 0..setosa {
        let _ = writeln!(out, "{}", row(i, 0));
    }
    out
}

/// Write training (80 kept rows) and test (20 kept rows) files; returns their paths.
pub fn write_fixtures(dir: &Path) -> (PathBuf, PathBuf) {
    let train = dir.join("iris_training.csv");
    let test = dir.join("iris_test.csv");
    std::fs::write(&train, csv(40, 20)).unwrap();
    std::fs::write(&test, csv(10, 5)).unwrap();
    (train, test)
}
