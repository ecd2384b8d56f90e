//! CSV output for simulated trajectories.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::transient::Trajectory;

/// Column header written before the data rows.
pub const CSV_HEADER: &str = "time,voltage,current,state";

/// Render a trajectory as CSV, one row per point in scientific notation.
pub fn to_csv_string(trajectory: &Trajectory, precision: usize) -> String {
    let mut out = String::with_capacity(64 * (trajectory.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');

    for p in &trajectory.points {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{:.prec$e},{:.prec$e},{:.prec$e},{:.prec$e}",
            p.time,
            p.voltage,
            p.current,
            p.state,
            prec = precision
        );
    }
    out
}

/// Write a trajectory to `path` as CSV.
pub fn write_csv(trajectory: &Trajectory, path: &Path, precision: usize) -> Result<()> {
    fs::write(path, to_csv_string(trajectory, precision))?;
    log::info!("wrote {} points to {}", trajectory.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transient::TrajectoryPoint;

    fn sample() -> Trajectory {
        Trajectory {
            points: vec![
                TrajectoryPoint {
                    time: 0.0,
                    voltage: 1.0,
                    current: 2.5e-3,
                    state: 0.1,
                },
                TrajectoryPoint {
                    time: 1e-3,
                    voltage: -0.5,
                    current: -1e-4,
                    state: 0.125,
                },
            ],
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_point() {
        let csv = to_csv_string(&sample(), 3);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "0.000e0,1.000e0,2.500e-3,1.000e-1");
        assert_eq!(lines[2], "1.000e-3,-5.000e-1,-1.000e-4,1.250e-1");
    }

    #[test]
    fn write_csv_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trajectory.csv");
        write_csv(&sample(), &path, 6).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with(CSV_HEADER));
        assert_eq!(contents.lines().count(), 3);
    }

    #[test]
    fn write_csv_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("trajectory.csv");
        assert!(matches!(
            write_csv(&sample(), &path, 6),
            Err(crate::Error::Io(_))
        ));
    }
}
