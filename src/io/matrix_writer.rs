use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use itertools::Itertools;

use crate::graph::*;

pub trait MatrixWriter {
    /// Writes the matrix in the format understood by [`super::WeightMatrixReader`]
    fn try_write_matrix<W: Write>(&self, writer: W) -> Result<(), std::io::Error>;
    fn try_write_matrix_file<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error>;

    /// Writes a human readable description of the instance
    fn try_write_summary<W: Write>(&self, writer: W) -> Result<(), std::io::Error>;
}

impl<T> MatrixWriter for T
where
    T: EdgeWeights,
{
    fn try_write_matrix<W: Write>(&self, mut writer: W) -> Result<(), std::io::Error> {
        writeln!(writer, "{}", self.number_of_nodes())?;

        for u in self.vertices() {
            writeln!(
                writer,
                "{}",
                self.vertices().map(|v| self.weight(u, v)).join(" ")
            )?;
        }

        writer.flush()
    }

    fn try_write_matrix_file<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_matrix(&mut writer)
    }

    fn try_write_summary<W: Write>(&self, mut writer: W) -> Result<(), std::io::Error> {
        writeln!(writer, "Travelling Salesman Problem configuration:")?;
        writeln!(writer, "  Number of nodes: {}", self.number_of_nodes())?;
        writeln!(writer, "  Adjacency matrix:")?;

        for u in self.vertices() {
            writeln!(
                writer,
                "  {}",
                self.vertices()
                    .map(|v| format!("{:>4}", self.weight(u, v)))
                    .join(" ")
            )?;
        }

        Ok(())
    }
}
