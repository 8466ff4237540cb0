// src/output.rs
use crate::mc::mc_engine::SimulationResult;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Write the meaningful `step <= tenor` region of a result, one row per cell.
pub fn write_matrix_to_csv(filename: &str, result: &SimulationResult) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    write_matrix(&mut file, result)?;
    file.flush()
}

pub fn write_matrix<W: Write>(out: &mut W, result: &SimulationResult) -> io::Result<()> {
    let with_se = result.std_error.is_some();
    if with_se {
        writeln!(out, "tenor,step,time,forward,std_error")?;
    } else {
        writeln!(out, "tenor,step,time,forward")?;
    }

    let tenors = result.grid.tenors();
    for k in 0..result.dimension() {
        for j in 0..=k {
            let time = tenors[j];
            let forward = result.mean[(k, j)];
            match result.std_error.as_ref() {
                Some(se) => writeln!(out, "{},{},{},{},{}", k, j, time, forward, se[(k, j)])?,
                None => writeln!(out, "{},{},{},{}", k, j, time, forward)?,
            }
        }
    }
    Ok(())
}

pub fn write_summary_to_csv(filename: &str, summary_data: &[(&str, &str)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    Ok(())
}
