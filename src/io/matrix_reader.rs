use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind, Lines},
    path::Path,
};

use crate::graph::{NumNodes, WeightMatrix};

pub type Result<T> = std::io::Result<T>;

macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(std::io::Error::new($kind, $info));
        }
    };
}

macro_rules! parse_next_value {
    ($iterator : expr, $name : expr) => {{
        let next = $iterator.next();
        raise_error_unless!(
            next.is_some(),
            ErrorKind::InvalidData,
            format!("Premature end of line when parsing {}.", $name)
        );

        let parsed = next.unwrap().parse();
        raise_error_unless!(
            parsed.is_ok(),
            ErrorKind::InvalidData,
            format!("Invalid value found. Cannot parse {}.", $name)
        );

        parsed.unwrap()
    }};
}

/// Reads a weight matrix in the text format
///
/// ```text
/// # comment
/// N
/// w(0,0) w(0,1) ... w(0,N-1)
/// ...
/// w(N-1,0) ...      w(N-1,N-1)
/// ```
///
/// Blank lines and lines starting with `#` are ignored.
pub trait WeightMatrixReader: Sized {
    fn try_read_matrix<R: BufRead>(reader: R) -> Result<Self>;
    fn try_read_matrix_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

impl WeightMatrixReader for WeightMatrix {
    fn try_read_matrix<R: BufRead>(reader: R) -> Result<Self> {
        let rows = MatrixReader::try_new(reader)?.try_read_rows()?;
        WeightMatrix::try_from_rows(rows)
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))
    }

    fn try_read_matrix_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = File::open(path)?;
        let buf_reader = BufReader::new(reader);
        Self::try_read_matrix(buf_reader)
    }
}

pub struct MatrixReader<R> {
    lines: Lines<R>,
    number_of_nodes: NumNodes,
}

impl<R: BufRead> MatrixReader<R> {
    pub fn try_new(reader: R) -> Result<Self> {
        let mut matrix_reader = Self {
            lines: reader.lines(),
            number_of_nodes: 0,
        };

        matrix_reader.number_of_nodes = matrix_reader.parse_header()?;
        Ok(matrix_reader)
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.number_of_nodes
    }

    /// Reads the remaining input as rows of signed weights. Signs are kept so that
    /// negative weights can be reported by [`WeightMatrix::try_from_rows`].
    pub fn try_read_rows(mut self) -> Result<Vec<Vec<i64>>> {
        // the header is untrusted; rows grow as they are parsed
        let n = self.number_of_nodes as usize;
        let mut rows = Vec::new();

        while let Some(line) = self.next_non_comment_line()? {
            raise_error_unless!(
                rows.len() < n,
                ErrorKind::InvalidData,
                format!("Too many rows; number of nodes is set to {n}")
            );

            rows.push(self.parse_row(&line, rows.len())?);
        }

        raise_error_unless!(
            rows.len() == n,
            ErrorKind::InvalidData,
            format!("Expected {n} rows, found {}", rows.len())
        );

        Ok(rows)
    }
}

impl<R: BufRead> MatrixReader<R> {
    fn next_non_comment_line(&mut self) -> Result<Option<String>> {
        loop {
            let line = self.lines.next();
            match line {
                None => return Ok(None),
                Some(Err(x)) => return Err(x),
                Some(Ok(line)) if line.trim().is_empty() || line.trim_start().starts_with('#') => {
                    continue;
                }
                Some(Ok(line)) => return Ok(Some(line)),
            }
        }
    }

    fn parse_header(&mut self) -> Result<NumNodes> {
        let line = self.next_non_comment_line()?;

        raise_error_unless!(line.is_some(), ErrorKind::InvalidData, "No header found");
        let line = line.unwrap();

        let mut parts = line.split_whitespace();
        let number_of_nodes: NumNodes = parse_next_value!(parts, "Header>Number of nodes");

        raise_error_unless!(
            parts.next().is_none(),
            ErrorKind::InvalidData,
            "Invalid header found; expected end of line"
        );

        raise_error_unless!(
            number_of_nodes > 0,
            ErrorKind::InvalidData,
            format!("{number_of_nodes} is an invalid number of nodes")
        );

        Ok(number_of_nodes)
    }

    fn parse_row(&self, line: &str, row: usize) -> Result<Vec<i64>> {
        let mut parts = line.split_whitespace();

        let mut weights = Vec::new();
        for col in 0..self.number_of_nodes {
            let weight: i64 = parse_next_value!(parts, format!("Weight ({row}, {col})"));
            weights.push(weight);
        }

        raise_error_unless!(
            parts.next().is_none(),
            ErrorKind::InvalidData,
            format!(
                "Row {row} has more than {} entries",
                self.number_of_nodes
            )
        );

        Ok(weights)
    }
}
