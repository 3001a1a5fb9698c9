//! Dataset representation for validation.
//!
//! A CSV file is loaded into a column-oriented table. Every cell is read as
//! text and nothing is coerced to missing: `None`, `NA` and empty cells stay
//! literal strings. Each column then gets a single inferred kind, so a
//! column is numeric only when every one of its cells is a number.

use crate::ValidationError;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// Whole number
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Text, kept verbatim
    String(String),
}

impl DataValue {
    /// Attempts to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DataValue::Int(i) => Some(*i as f64),
            DataValue::Float(f) => Some(*f),
            DataValue::String(_) => None,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Int(i) => write!(f, "{i}"),
            DataValue::Float(v) => write!(f, "{v}"),
            DataValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Int(i)
    }
}

impl From<f64> for DataValue {
    fn from(f: f64) -> Self {
        DataValue::Float(f)
    }
}

/// Storage kind inferred for a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every cell is a 64-bit integer
    Integer,
    /// Every cell is a finite number, at least one not an integer
    Float,
    /// Anything else
    Text,
}

impl ColumnKind {
    /// Whether the column has a numeric dtype.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }

    /// Returns the dtype name of this kind.
    pub fn dtype(self) -> &'static str {
        match self {
            ColumnKind::Integer => "int64",
            ColumnKind::Float => "float64",
            ColumnKind::Text => "string",
        }
    }

    fn infer(cells: &[String]) -> Self {
        if cells.is_empty() {
            return ColumnKind::Text;
        }
        if cells.iter().all(|c| c.trim().parse::<i64>().is_ok()) {
            ColumnKind::Integer
        } else if cells.iter().all(|c| parse_number(c).is_some()) {
            ColumnKind::Float
        } else {
            ColumnKind::Text
        }
    }
}

/// Parses a finite decimal number. Spelled-out forms like `nan` or `inf`
/// are text.
fn parse_number(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A named, uniformly typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    values: Vec<DataValue>,
}

impl Column {
    /// Builds a column from raw cell text, inferring its kind.
    pub fn from_cells(name: impl Into<String>, cells: Vec<String>) -> Self {
        let kind = ColumnKind::infer(&cells);
        let values = match kind {
            ColumnKind::Integer => cells
                .iter()
                .filter_map(|c| c.trim().parse::<i64>().ok())
                .map(DataValue::Int)
                .collect(),
            ColumnKind::Float => cells
                .iter()
                .filter_map(|c| parse_number(c))
                .map(DataValue::Float)
                .collect(),
            ColumnKind::Text => cells.into_iter().map(DataValue::String).collect(),
        };

        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the inferred kind.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Returns the cell values in row order.
    pub fn values(&self) -> &[DataValue] {
        &self.values
    }

    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the numeric cells as floats; empty for text columns.
    pub fn numbers(&self) -> Vec<f64> {
        self.values.iter().filter_map(DataValue::as_float).collect()
    }

    /// Counts occurrences of each distinct value, keyed by its display form.
    pub fn value_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for value in &self.values {
            *counts.entry(value.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Returns the distinct values in first-seen order.
    pub fn distinct(&self) -> Vec<&DataValue> {
        let mut seen: Vec<&DataValue> = Vec::new();
        for value in &self.values {
            if !seen.contains(&value) {
                seen.push(value);
            }
        }
        seen
    }
}

/// A loaded table: named columns of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    columns: Vec<Column>,
    rows: usize,
}

impl DataSet {
    /// Creates a dataset from columns.
    ///
    /// # Panics
    ///
    /// Panics if the columns differ in length.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        let rows = columns.first().map_or(0, Column::len);
        assert!(
            columns.iter().all(|c| c.len() == rows),
            "all columns must have the same length"
        );
        Self { columns, rows }
    }

    /// Reads a CSV with a header row from any reader.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

        for record in reader.records() {
            let record = record?;
            for (column, cell) in cells.iter_mut().zip(record.iter()) {
                column.push(cell.to_string());
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, cells)| Column::from_cells(name, cells))
            .collect();

        Ok(Self::from_columns(columns))
    }

    /// Loads a CSV file.
    pub fn load_csv(path: &Path) -> Result<Self, ValidationError> {
        let file = std::fs::File::open(path).map_err(|e| ValidationError::load(path, e))?;
        let dataset = Self::from_csv_reader(file).map_err(|e| ValidationError::load(path, e))?;
        debug!(
            path = %path.display(),
            rows = dataset.len(),
            columns = dataset.columns.len(),
            "loaded csv"
        );
        Ok(dataset)
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns the columns in file order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column names in file order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// Looks up a column by name. With a repeated header, the first match.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns every column carrying the given header name.
    pub fn columns_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Column> {
        self.columns.iter().filter(move |c| c.name == name)
    }

    /// Returns the header names that appear more than once, sorted.
    pub fn duplicate_column_names(&self) -> Vec<&str> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for name in self.column_names() {
            *counts.entry(name).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect()
    }

    /// Returns a copy of the dataset without the named column.
    pub fn without_column(&self, name: &str) -> DataSet {
        DataSet {
            columns: self
                .columns
                .iter()
                .filter(|c| c.name != name)
                .cloned()
                .collect(),
            rows: self.rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(csv: &str) -> DataSet {
        DataSet::from_csv_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_kind_inference() {
        let dataset = parse("id,count,score,note\nP1,3,0.5,ok\nP2,4,1,None\n");

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.column("id").unwrap().kind(), ColumnKind::Text);
        assert_eq!(dataset.column("count").unwrap().kind(), ColumnKind::Integer);
        assert_eq!(dataset.column("score").unwrap().kind(), ColumnKind::Float);
        assert_eq!(dataset.column("note").unwrap().kind(), ColumnKind::Text);
    }

    #[test]
    fn test_none_kept_literally() {
        let dataset = parse("assistive_device\nNone\ncane\nwalker\n");
        let column = dataset.column("assistive_device").unwrap();

        assert_eq!(column.values()[0], DataValue::from("None"));
        assert_eq!(column.len(), 3);
    }

    #[test]
    fn test_empty_cell_makes_column_text() {
        let dataset = parse("id,bmi\nP1,22.5\nP2,\nP3,24.1\n");
        let column = dataset.column("bmi").unwrap();

        assert_eq!(column.kind(), ColumnKind::Text);
        assert_eq!(column.values()[1], DataValue::from(""));
    }

    #[test]
    fn test_spelled_out_numbers_are_text() {
        assert_eq!(parse("x\n1.0\nnan\n").column("x").unwrap().kind(), ColumnKind::Text);
        assert_eq!(parse("x\n1.0\ninf\n").column("x").unwrap().kind(), ColumnKind::Text);
        assert_eq!(parse("x\n1e3\n2.5E-1\n").column("x").unwrap().kind(), ColumnKind::Float);
    }

    #[test]
    fn test_integer_column_promoted_when_mixed() {
        let dataset = parse("falls\n1\n2.0\n");
        let column = dataset.column("falls").unwrap();

        assert_eq!(column.kind(), ColumnKind::Float);
        assert_eq!(column.numbers(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_value_counts_and_distinct() {
        let dataset = parse("label\n0\n1\n0\n0\n");
        let column = dataset.column("label").unwrap();

        let counts = column.value_counts();
        assert_eq!(counts.get("0"), Some(&3));
        assert_eq!(counts.get("1"), Some(&1));
        assert_eq!(column.distinct(), vec![&DataValue::Int(0), &DataValue::Int(1)]);
    }

    #[test]
    fn test_column_order_preserved() {
        let dataset = parse("c,a,b\n1,2,3\n");
        assert_eq!(dataset.column_names().collect::<Vec<_>>(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_without_column() {
        let dataset = parse("a,b\n1,2\n");
        let trimmed = dataset.without_column("a");

        assert_eq!(trimmed.column_names().collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(trimmed.len(), 1);
    }

    #[test]
    fn test_repeated_header_kept_as_separate_columns() {
        let dataset = parse("id,label,label,id,x\nP1,0,7,P1,1\n");

        assert_eq!(dataset.columns().len(), 5);
        assert_eq!(dataset.duplicate_column_names(), vec!["id", "label"]);
        let labels: Vec<ColumnKind> = dataset.columns_named("label").map(Column::kind).collect();
        assert_eq!(labels, vec![ColumnKind::Integer, ColumnKind::Integer]);
        assert!(parse("a,b\n1,2\n").duplicate_column_names().is_empty());
    }

    #[test]
    fn test_header_only_csv() {
        let dataset = parse("id,label\n");
        assert!(dataset.is_empty());
        assert_eq!(dataset.columns().len(), 2);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert!(DataSet::from_csv_reader("a,b\n1,2\n3\n".as_bytes()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = DataSet::load_csv(Path::new("/nonexistent/data.csv")).unwrap_err();
        assert!(matches!(err, ValidationError::Load { .. }));
    }
}
