use std::{fs, path::Path};

use ndarray::{s, Array2, ArrayView1, ArrayView2};

use crate::error::{EvalErr, Result};

/// A table of named numeric columns, one sample per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Array2<f64>,
}

impl Table {
    /// Reads a table from a CSV file.
    ///
    /// # Arguments
    /// * `path` - The CSV file.
    /// * `header` - Whether the first non-blank line holds the column names.
    ///
    /// # Errors
    /// If the file can't be read or any line isn't a row of numbers as wide as the first one.
    pub fn load<P: AsRef<Path>>(path: P, header: bool) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| EvalErr::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, header)
    }

    /// Parses a table from CSV text. Blank lines are skipped; line numbers in errors are
    /// 1-based and count them.
    pub fn parse(content: &str, header: bool) -> Result<Self> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let mut columns = None;
        if header {
            if let Some((_, line)) = lines.next() {
                columns = Some(line.split(',').map(|c| c.trim().to_string()).collect::<Vec<_>>());
            }
        }

        let mut width = columns.as_ref().map(Vec::len);
        let mut data = Vec::new();
        let mut nrows = 0;

        for (i, line) in lines {
            let values = line
                .split(',')
                .map(|v| {
                    v.trim().parse::<f64>().map_err(|_| EvalErr::Table {
                        line: i,
                        msg: format!("cannot parse '{}' as a number", v.trim()),
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let expected = *width.get_or_insert(values.len());
            if values.len() != expected {
                return Err(EvalErr::Table {
                    line: i,
                    msg: format!("expected {expected} values, got {}", values.len()),
                });
            }

            data.extend(values);
            nrows += 1;
        }

        let width = width.unwrap_or(0);
        let columns = columns.unwrap_or_else(|| (0..width).map(|j| format!("c{j}")).collect());
        let rows = Array2::from_shape_vec((nrows, width), data).map_err(|e| EvalErr::Table {
            line: 0,
            msg: e.to_string(),
        })?;

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> ArrayView2<'_, f64> {
        self.rows.view()
    }

    pub fn nrows(&self) -> usize {
        self.rows.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.rows.ncols()
    }

    /// Returns the column with the given name, if any.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        let j = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.column(j))
    }

    /// Splits the table into its feature and reference columns.
    ///
    /// # Arguments
    /// * `x_size` - The amount of leading feature columns.
    /// * `y_size` - The amount of trailing reference columns.
    ///
    /// # Returns
    /// Both views, or a `Columns` error if the table isn't exactly `x_size + y_size` wide.
    pub fn split(
        &self,
        x_size: usize,
        y_size: usize,
    ) -> Result<(ArrayView2<'_, f64>, ArrayView2<'_, f64>)> {
        if self.ncols() != x_size + y_size {
            return Err(EvalErr::Columns {
                got: self.ncols(),
                expected: x_size + y_size,
            });
        }

        let x = self.rows.slice(s![.., ..x_size]);
        let y = self.rows.slice(s![.., x_size..]);
        Ok((x, y))
    }
}
