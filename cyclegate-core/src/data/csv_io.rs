use super::DataError;
use crate::domain::{Bar, Interval, Tick};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct MinuteBarRecord {
    symbol: String,
    datetime: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: f64,
    #[serde(default)]
    open_interest: f64,
}

impl From<MinuteBarRecord> for Bar {
    fn from(r: MinuteBarRecord) -> Self {
        Bar {
            symbol: r.symbol,
            interval: Interval::Minute,
            datetime: r.datetime,
            open: r.open,
            high: r.high,
            low: r.low,
            close: r.close,
            volume: r.volume,
            open_interest: r.open_interest,
        }
    }
}

fn open(path: &Path) -> Result<File, DataError> {
    File::open(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_ticks_csv(path: &Path) -> Result<Vec<Tick>, DataError> {
    read_ticks(open(path)?)
}

pub fn load_minute_bars_csv(path: &Path) -> Result<Vec<Bar>, DataError> {
    read_minute_bars(open(path)?)
}

/// Parse ticks from CSV. Rows with a non-finite price are rejected; zero
/// prices pass through (the bar generator ignores them).
pub fn read_ticks<R: Read>(reader: R) -> Result<Vec<Tick>, DataError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut ticks = Vec::new();
    for (i, record) in rdr.deserialize::<Tick>().enumerate() {
        let tick = record?;
        if !tick.last_price.is_finite() {
            return Err(DataError::Validation {
                row: i + 1,
                reason: format!("non-finite last_price {}", tick.last_price),
            });
        }
        ticks.push(tick);
    }
    Ok(ticks)
}

/// Parse 1-minute bars from CSV, rejecting bars whose OHLC is inconsistent.
pub fn read_minute_bars<R: Read>(reader: R) -> Result<Vec<Bar>, DataError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut bars = Vec::new();
    for (i, record) in rdr.deserialize::<MinuteBarRecord>().enumerate() {
        let bar = Bar::from(record?);
        if !bar.is_sane() {
            return Err(DataError::Validation {
                row: i + 1,
                reason: format!(
                    "inconsistent OHLC o={} h={} l={} c={}",
                    bar.open, bar.high, bar.low, bar.close
                ),
            });
        }
        bars.push(bar);
    }
    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn reads_ticks_with_optional_columns() {
        let text = "symbol,datetime,last_price,volume,open_interest\n\
                    rb2410,2024-03-01T09:00:01Z,3650.0,10,1200\n\
                    rb2410,2024-03-01T09:00:02Z,3651.0,12,1201\n";
        let ticks = read_ticks(text.as_bytes()).unwrap();
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].datetime, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 1).unwrap());
        assert_eq!(ticks[1].last_price, 3651.0);
        assert_eq!(ticks[1].volume, 12.0);
    }

    #[test]
    fn rejects_bad_tick_rows() {
        let text = "symbol,datetime,last_price,volume,open_interest\n\
                    rb2410,not-a-date,3650.0,10,1200\n";
        assert!(matches!(read_ticks(text.as_bytes()), Err(DataError::Csv(_))));
    }

    #[test]
    fn reads_minute_bars() {
        let text = "symbol,datetime,open,high,low,close,volume,open_interest\n\
                    rb2410,2024-03-01T09:00:00Z,10,12,9,11,100,5\n";
        let bars = read_minute_bars(text.as_bytes()).unwrap();
        assert_eq!(bars[0].interval, Interval::Minute);
        assert_eq!(bars[0].high, 12.0);
    }

    #[test]
    fn rejects_inconsistent_bar() {
        let text = "symbol,datetime,open,high,low,close,volume,open_interest\n\
                    rb2410,2024-03-01T09:00:00Z,10,9,8,11,100,5\n";
        let err = read_minute_bars(text.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Validation { row: 1, .. }));
    }
}
