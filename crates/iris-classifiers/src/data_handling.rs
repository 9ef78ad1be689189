//! Data structures and helpers for shaping the Iris dataset.
//!
//! This module defines `Record` and `Table` for the raw five-field schema,
//! the projected `FeatureSet` / `LabelSet` pair consumed by the later stages,
//! and the two table-level stages of the pipeline: species filtering with
//! relabelling, and merging the training and test tables.
use ndarray::{Array1, Array2, Axis};

use crate::error::{IrisError, Result};

/// Names given to the five CSV fields, in file order.
pub const COLUMN_NAMES: [&str; 5] = [
    "SepalLength",
    "SepalWidth",
    "PetalLength",
    "PetalWidth",
    "Species",
];

/// The four numeric measurement columns.
pub const FEATURE_COLUMNS: [&str; 4] = ["SepalLength", "SepalWidth", "PetalLength", "PetalWidth"];

/// The label column.
pub const LABEL_COLUMN: &str = "Species";

/// Species code dropped by `filter_and_relabel` (Setosa).
pub const EXCLUDED_SPECIES: i64 = 0;

/// One flower measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
    pub species: i64,
}

impl Record {
    pub fn new(
        sepal_length: f64,
        sepal_width: f64,
        petal_length: f64,
        petal_width: f64,
        species: i64,
    ) -> Self {
        Record {
            sepal_length,
            sepal_width,
            petal_length,
            petal_width,
            species,
        }
    }

    /// Measurements in `FEATURE_COLUMNS` order.
    pub fn features(&self) -> [f64; 4] {
        [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ]
    }
}

/// Ordered rows sharing the five-field schema. A row's position is its index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Table { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn nrows(&self) -> usize {
        self.records.len()
    }

    pub fn ncols(&self) -> usize {
        COLUMN_NAMES.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All five columns as an `(nrows, 5)` matrix, the label cast to `f64`.
    pub fn to_matrix(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.nrows(), COLUMN_NAMES.len()), |(i, j)| {
            let r = &self.records[i];
            match j {
                4 => r.species as f64,
                _ => r.features()[j],
            }
        })
    }

    /// Project onto the four measurement columns.
    pub fn features(&self) -> FeatureSet {
        let values = Array2::from_shape_fn((self.nrows(), FEATURE_COLUMNS.len()), |(i, j)| {
            self.records[i].features()[j]
        });
        FeatureSet {
            columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            values,
        }
    }

    /// Project onto the label column.
    pub fn labels(&self) -> LabelSet {
        LabelSet {
            name: LABEL_COLUMN.to_string(),
            values: self.records.iter().map(|r| r.species).collect(),
        }
    }

    pub fn log_summary(&self, name: &str) {
        log::info!(
            "{}: {} rows, {} columns",
            name,
            self.nrows(),
            self.ncols()
        );
    }
}

/// Named numeric columns, rows are samples.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    pub columns: Vec<String>,
    pub values: Array2<f64>,
}

impl FeatureSet {
    pub fn new(columns: Vec<String>, values: Array2<f64>) -> Result<Self> {
        if columns.len() != values.ncols() {
            return Err(IrisError::Format(format!(
                "{} column names for a matrix with {} columns",
                columns.len(),
                values.ncols()
            )));
        }
        Ok(FeatureSet { columns, values })
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// Rows at `indices`, in that order.
    pub fn select_rows(&self, indices: &[usize]) -> FeatureSet {
        FeatureSet {
            columns: self.columns.clone(),
            values: self.values.select(Axis(0), indices),
        }
    }
}

/// A single named label column.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSet {
    pub name: String,
    pub values: Array1<i64>,
}

impl LabelSet {
    pub fn new(values: Vec<i64>) -> Self {
        LabelSet {
            name: LABEL_COLUMN.to_string(),
            values: Array1::from_vec(values),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn select_rows(&self, indices: &[usize]) -> LabelSet {
        LabelSet {
            name: self.name.clone(),
            values: self.values.select(Axis(0), indices),
        }
    }
}

/// Disjoint training and test subsets produced by the splitter.
#[derive(Debug, Clone)]
pub struct SplitResult {
    pub train_features: FeatureSet,
    pub train_labels: LabelSet,
    pub test_features: FeatureSet,
    pub test_labels: LabelSet,
}

/// Drop the excluded species and remap the remaining codes 1 → 0, 2 → 1.
///
/// Rows keep their relative order. An empty table yields an empty table.
pub fn filter_and_relabel(table: &Table) -> Table {
    let records: Vec<Record> = table
        .records
        .iter()
        .filter(|r| r.species > EXCLUDED_SPECIES)
        .map(|r| Record {
            species: r.species - 1,
            ..*r
        })
        .collect();

    log::debug!(
        "Filtered species {}: kept {} of {} rows",
        EXCLUDED_SPECIES,
        records.len(),
        table.nrows()
    );

    Table::new(records)
}

/// Concatenate `train` then `test`; the result is indexed 0..n contiguously.
pub fn merge_tables(train: &Table, test: &Table) -> Table {
    let mut records = Vec::with_capacity(train.nrows() + test.nrows());
    records.extend_from_slice(&train.records);
    records.extend_from_slice(&test.records);
    Table::new(records)
}
