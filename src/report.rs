use crate::mixture::IterationRecord;
use std::io::{self, Write};

pub const HEADER: &str = "i\t\tu_1\t\tu_2\t\tu_3\t\tLogLihood";

/// Renders iteration records as tab-separated rows with five decimals.
///
/// The header is written once, before the first row.
pub struct TraceWriter<W: Write> {
    out: W,
    header_written: bool,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            header_written: false,
        }
    }

    pub fn write_record(&mut self, record: &IterationRecord) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.out, "{}", HEADER)?;
            self.header_written = true;
        }
        writeln!(self.out, "{}", format_record(record))
    }

    pub fn write_all<'a, I>(&mut self, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a IterationRecord>,
    {
        for record in records {
            self.write_record(record)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn format_record(record: &IterationRecord) -> String {
    let [u1, u2, u3] = *record.means.means();
    format!(
        "[{},]\t{:.5}\t{:.5}\t{:.5}\t{:.5}",
        record.index, u1, u2, u3, record.objective
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixture::ParameterVector;

    fn record(index: usize, means: [f64; 3], objective: f64) -> IterationRecord {
        IterationRecord {
            index,
            means: ParameterVector::new(means),
            objective,
        }
    }

    #[test]
    fn test_format_initial_row() {
        let row = format_record(&record(1, [1.0, 10.0, 22.0], 0.0));
        assert_eq!(row, "[1,]\t1.00000\t10.00000\t22.00000\t0.00000");
    }

    #[test]
    fn test_format_rounds_to_five_places() {
        let row = format_record(&record(12, [-0.123456, 2.0, 3.333333], -20.2390188));
        assert_eq!(row, "[12,]\t-0.12346\t2.00000\t3.33333\t-20.23902");
    }

    #[test]
    fn test_format_nan() {
        let row = format_record(&record(2, [f64::NAN, 1.0, 2.0], f64::NAN));
        assert_eq!(row, "[2,]\tNaN\t1.00000\t2.00000\tNaN");
    }

    #[test]
    fn test_header_written_once() {
        let mut writer = TraceWriter::new(Vec::new());
        let trace = vec![record(1, [0.0, 0.0, 0.0], 0.0), record(2, [0.0, 0.0, 0.0], -1.0)];
        writer.write_all(&trace).unwrap();

        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert!(lines[2].starts_with("[2,]\t"));
        assert!(text.ends_with('\n'));
    }
}
