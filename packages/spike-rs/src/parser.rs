use crate::error::{Result, SpikeError};
use crate::types::{SpikeRecord, SpikeTable, StimulusRecord, StimulusTable};

/// Column names the loaders guarantee (seconds-scaled floats for times).
pub const SPIKE_TIME_COLUMN: &str = "spike_time";
pub const UNIT_ID_COLUMN: &str = "unit_id";
pub const BRAIN_AREA_COLUMN: &str = "brain_area";
pub const START_TIME_COLUMN: &str = "start_time";

/// Parse a headered spike CSV from a byte slice (e.g. an mmap).
///
/// Requires `spike_time`, `unit_id` and `brain_area` columns; column order is
/// free and extra columns are ignored. `#` comment lines and blank lines are
/// skipped. Non-finite spike times are rejected.
pub fn parse_spike_table(content: &[u8], file: &str) -> Result<SpikeTable> {
    let mut rows = Vec::new();
    let mut header: Option<(usize, usize, usize)> = None;

    for (line_no, line) in lines(content) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        let (time_col, unit_col, area_col) = match header {
            Some(cols) => cols,
            None => {
                let cols = (
                    require_column(&fields, SPIKE_TIME_COLUMN, file)?,
                    require_column(&fields, UNIT_ID_COLUMN, file)?,
                    require_column(&fields, BRAIN_AREA_COLUMN, file)?,
                );
                header = Some(cols);
                continue;
            }
        };

        let time = parse_time(&fields, time_col, file, line_no)?;
        let unit_id = field(&fields, unit_col, file, line_no)?
            .parse::<u64>()
            .map_err(|_| bad_field(file, line_no, UNIT_ID_COLUMN, &fields[unit_col]))?;
        let brain_area = field(&fields, area_col, file, line_no)?.to_string();

        rows.push(SpikeRecord {
            time,
            unit_id,
            brain_area,
        });
    }

    if header.is_none() {
        return Err(SpikeError::MissingColumn {
            column: SPIKE_TIME_COLUMN,
            file: file.to_string(),
        });
    }

    Ok(SpikeTable::new(rows))
}

/// Parse a headered stimulus CSV from a byte slice.
///
/// Requires a `start_time` column; same comment/blank-line handling as
/// `parse_spike_table`.
pub fn parse_stimulus_table(content: &[u8], file: &str) -> Result<StimulusTable> {
    let mut rows = Vec::new();
    let mut start_col: Option<usize> = None;

    for (line_no, line) in lines(content) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        let col = match start_col {
            Some(col) => col,
            None => {
                let col = require_column(&fields, START_TIME_COLUMN, file)?;
                start_col = Some(col);
                continue;
            }
        };

        let start_time = parse_time(&fields, col, file, line_no)?;
        rows.push(StimulusRecord { start_time });
    }

    if start_col.is_none() {
        return Err(SpikeError::MissingColumn {
            column: START_TIME_COLUMN,
            file: file.to_string(),
        });
    }

    Ok(StimulusTable::new(rows))
}

/// Non-blank, non-comment lines with 1-based line numbers.
fn lines(content: &[u8]) -> impl Iterator<Item = (usize, &str)> {
    content
        .split(|&b| b == b'\n')
        .enumerate()
        .filter_map(|(i, raw)| {
            let line = std::str::from_utf8(raw).ok()?.trim_end_matches('\r').trim();
            if line.is_empty() || line.starts_with('#') {
                None
            } else {
                Some((i + 1, line))
            }
        })
}

fn require_column(header: &[&str], name: &'static str, file: &str) -> Result<usize> {
    header
        .iter()
        .position(|&f| f == name)
        .ok_or_else(|| SpikeError::MissingColumn {
            column: name,
            file: file.to_string(),
        })
}

fn field<'a>(fields: &[&'a str], col: usize, file: &str, line_no: usize) -> Result<&'a str> {
    fields.get(col).copied().ok_or_else(|| {
        SpikeError::ParseError(format!(
            "{}:{}: row has {} fields, expected at least {}",
            file,
            line_no,
            fields.len(),
            col + 1
        ))
    })
}

fn parse_time(fields: &[&str], col: usize, file: &str, line_no: usize) -> Result<f64> {
    let raw = field(fields, col, file, line_no)?;
    let value = raw
        .parse::<f64>()
        .map_err(|_| bad_field(file, line_no, "time", raw))?;
    if !value.is_finite() {
        return Err(SpikeError::ParseError(format!(
            "{}:{}: non-finite timestamp '{}'",
            file, line_no, raw
        )));
    }
    Ok(value)
}

fn bad_field(file: &str, line_no: usize, column: &str, raw: &str) -> SpikeError {
    SpikeError::ParseError(format!(
        "{}:{}: invalid {} value '{}'",
        file, line_no, column, raw
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spike_table() {
        let csv = b"spike_time,unit_id,brain_area\n0.1,1,LM\n0.6,1,LM\n1.2,2,VISP\n";
        let table = parse_spike_table(csv, "flash_spikes.csv").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[0].time, 0.1);
        assert_eq!(table.rows()[2].unit_id, 2);
        assert_eq!(table.rows()[2].brain_area, "VISP");
    }

    #[test]
    fn test_parse_column_order_free_extra_ignored() {
        let csv = b"brain_area,depth,spike_time,unit_id\nLM,120,0.25,4\n";
        let table = parse_spike_table(csv, "f.csv").unwrap();
        assert_eq!(table.rows()[0].time, 0.25);
        assert_eq!(table.rows()[0].unit_id, 4);
        assert_eq!(table.rows()[0].brain_area, "LM");
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let csv = b"# exported session\nspike_time,unit_id,brain_area\n\n0.1,1,LM\n# trailing note\n";
        let table = parse_spike_table(csv, "f.csv").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_parse_missing_column() {
        let csv = b"spike_time,unit\n0.1,1\n";
        match parse_spike_table(csv, "f.csv") {
            Err(SpikeError::MissingColumn { column, file }) => {
                assert_eq!(column, UNIT_ID_COLUMN);
                assert_eq!(file, "f.csv");
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_file_is_missing_column() {
        assert!(matches!(
            parse_spike_table(b"", "f.csv"),
            Err(SpikeError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_parse_bad_float() {
        let csv = b"spike_time,unit_id,brain_area\noops,1,LM\n";
        assert!(matches!(
            parse_spike_table(csv, "f.csv"),
            Err(SpikeError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_finite_time() {
        let csv = b"spike_time,unit_id,brain_area\nNaN,1,LM\n";
        assert!(matches!(
            parse_spike_table(csv, "f.csv"),
            Err(SpikeError::ParseError(_))
        ));
        let csv = b"spike_time,unit_id,brain_area\ninf,1,LM\n";
        assert!(matches!(
            parse_spike_table(csv, "f.csv"),
            Err(SpikeError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_short_row() {
        let csv = b"spike_time,unit_id,brain_area\n0.1,1\n";
        assert!(matches!(
            parse_spike_table(csv, "f.csv"),
            Err(SpikeError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_stimulus_table() {
        let csv = b"start_time,stop_time\n0.0,0.25\n1.0,1.25\n";
        let table = parse_stimulus_table(csv, "flash_stimuli.csv").unwrap();
        assert_eq!(table.onsets(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_parse_stimulus_missing_column() {
        let csv = b"onset\n0.0\n";
        assert!(matches!(
            parse_stimulus_table(csv, "f.csv"),
            Err(SpikeError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_parse_crlf_lines() {
        let csv = b"spike_time,unit_id,brain_area\r\n0.1,1,LM\r\n";
        let table = parse_spike_table(csv, "f.csv").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].brain_area, "LM");
    }
}
