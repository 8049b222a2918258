//! Streaming CSV reader for vacancy exports.
//!
//! Rows are read one at a time, filtered by shape, remapped into canonical
//! field order and turned into [`VacancyRecord`]s.

use csv::{ReaderBuilder, StringRecord};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::vacancy::VacancyRecord;

/// Column count of the extended export that also carries description,
/// skills, experience and similar columns.
pub const EXTENDED_WIDTH: usize = 12;

pub const CANONICAL_WIDTH: usize = 6;

/// How a raw row maps onto the canonical six fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLayout {
    /// name, salary_from, salary_to, currency, area, published_at (extra columns ignored)
    Canonical,
    /// 12 columns; canonical fields sit at 0, 6, 7, 9, 10, 11
    Extended,
}

impl RowLayout {
    pub fn from_width(width: usize) -> Result<Self> {
        match width {
            EXTENDED_WIDTH => Ok(RowLayout::Extended),
            w if w >= CANONICAL_WIDTH => Ok(RowLayout::Canonical),
            w => Err(ReportError::UnsupportedLayout(w)),
        }
    }
}

/// Picks the canonical fields out of a row that already passed [`is_complete`].
pub fn canonical_fields(record: &StringRecord, layout: RowLayout) -> [&str; 6] {
    let field = |i: usize| record.get(i).unwrap_or("");

    match layout {
        RowLayout::Extended => [field(0), field(6), field(7), field(9), field(10), field(11)],
        RowLayout::Canonical => [field(0), field(1), field(2), field(3), field(4), field(5)],
    }
}

/// A row is usable when it has exactly `width` fields and none of them is empty.
pub fn is_complete(record: &StringRecord, width: usize) -> bool {
    record.len() == width && record.iter().all(|f| !f.is_empty())
}

/// Iterator over the valid vacancies of one file.
///
/// Owns the file handle; it is closed when the reader is dropped, which
/// happens on every exit path of the caller including `?` on a bad row.
pub struct VacancyReader {
    inner: csv::Reader<Box<dyn Read>>,
    layout: Option<RowLayout>,
    width: usize,
    record: StringRecord,
    skipped: usize,
}

impl VacancyReader {
    /// Opens `path`, transparently decompressing it when the name ends in `.gz`.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| ReportError::InputNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let source: Box<dyn Read> = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };

        Self::from_reader(source)
    }

    pub fn from_reader(source: Box<dyn Read>) -> Result<Self> {
        let mut inner = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let width = inner.headers()?.len();
        // A file without a header line has nothing to map and yields no rows.
        let layout = if width == 0 {
            None
        } else {
            Some(RowLayout::from_width(width)?)
        };
        debug!(width, ?layout, "CSV header read");

        Ok(Self {
            inner,
            layout,
            width,
            record: StringRecord::new(),
            skipped: 0,
        })
    }

    /// Rows dropped so far by the shape filter: a column count other than the
    /// header's, or an empty field. Blank lines are discarded by the CSV
    /// reader before the filter sees them and are not counted.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn layout(&self) -> Option<RowLayout> {
        self.layout
    }
}

impl Iterator for VacancyReader {
    type Item = Result<VacancyRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let layout = self.layout?;

        loop {
            match self.inner.read_record(&mut self.record) {
                Ok(false) => return None,
                Ok(true) => {
                    if !is_complete(&self.record, self.width) {
                        self.skipped += 1;
                        continue;
                    }
                    let fields = canonical_fields(&self.record, layout);
                    return Some(VacancyRecord::from_fields(fields));
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn reader(content: &str) -> VacancyReader {
        VacancyReader::from_reader(Box::new(Cursor::new(content.as_bytes().to_vec()))).unwrap()
    }

    #[test]
    fn test_layout_from_width() {
        assert_eq!(RowLayout::from_width(6).unwrap(), RowLayout::Canonical);
        assert_eq!(RowLayout::from_width(7).unwrap(), RowLayout::Canonical);
        assert_eq!(RowLayout::from_width(12).unwrap(), RowLayout::Extended);
        assert!(matches!(
            RowLayout::from_width(4),
            Err(ReportError::UnsupportedLayout(4))
        ));
    }

    #[test]
    fn test_canonical_rows() {
        let mut rdr = reader(
            "name,salary_from,salary_to,salary_currency,area_name,published_at\n\
             Engineer,1000,2000,RUR,Moscow,2020-01-01\n",
        );
        let v = rdr.next().unwrap().unwrap();

        assert_eq!(v.name, "Engineer");
        assert_eq!(v.area_name, "Moscow");
        assert_eq!(v.published_year, 2020);
        assert!(rdr.next().is_none());
    }

    #[test]
    fn test_extended_rows_are_remapped() {
        let mut rdr = reader(
            "name,description,key_skills,experience_id,premium,employer_name,salary_from,salary_to,salary_gross,salary_currency,area_name,published_at\n\
             Аналитик,desc,SQL,between1And3,False,Acme,50000,70000,True,EUR,Казань,2018-03-04T10:00:00+0300\n",
        );
        let v = rdr.next().unwrap().unwrap();

        assert_eq!(rdr.layout(), Some(RowLayout::Extended));
        assert_eq!(v.name, "Аналитик");
        assert_eq!(v.salary_from, 50000);
        assert_eq!(v.salary_to, 70000);
        assert_eq!(v.currency, Currency::Eur);
        assert_eq!(v.area_name, "Казань");
        assert_eq!(v.published_year, 2018);
    }

    #[test]
    fn test_short_long_and_empty_rows_are_skipped() {
        let mut rdr = reader(
            "name,from,to,currency,city,date\n\
             A,1,2,RUR,Moscow\n\
             B,1,2,RUR,Moscow,2020,extra\n\
             C,,2,RUR,Moscow,2020\n\
             D,1,2,RUR,Moscow,2020\n",
        );
        let names: Vec<String> = rdr.by_ref().map(|r| r.unwrap().name).collect();

        assert_eq!(names, vec!["D"]);
        assert_eq!(rdr.skipped(), 3);
    }

    #[test]
    fn test_blank_lines_are_not_counted_as_skipped() {
        let mut rdr = reader("name,from,to,currency,city,date\n\nA,1,2,RUR,Omsk,2020\n\n");

        assert_eq!(rdr.by_ref().count(), 1);
        assert_eq!(rdr.skipped(), 0);
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let mut rdr = reader(
            "name,from,to,currency,city,date\n\
             \"Engineer, backend\",1,2,RUR,Moscow,2021-01-01\n",
        );
        assert_eq!(rdr.next().unwrap().unwrap().name, "Engineer, backend");
    }

    #[test]
    fn test_bom_header_is_accepted() {
        let mut rdr = reader("\u{feff}name,from,to,currency,city,date\nA,1,2,RUR,Omsk,2020\n");
        assert_eq!(rdr.next().unwrap().unwrap().area_name, "Omsk");
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let mut rdr = reader("");
        assert!(rdr.next().is_none());
    }

    #[test]
    fn test_missing_file() {
        let err = VacancyReader::open(Path::new("/definitely/not/here.csv")).err().unwrap();
        assert!(matches!(err, ReportError::InputNotFound { .. }));
    }

    #[test]
    fn test_gzip_input() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(b"name,from,to,currency,city,date\nA,1,2,RUR,Omsk,2020\n")
            .unwrap();
        let compressed = encoder.finish().unwrap();

        let mut file = tempfile::Builder::new().suffix(".csv.gz").tempfile().unwrap();
        file.write_all(&compressed).unwrap();

        let records: Vec<_> = VacancyReader::open(file.path())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].area_name, "Omsk");
    }

    #[test]
    fn test_plain_file_on_disk() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "name,from,to,currency,city,date\nA,1,2,KZT,Omsk,2020\n").unwrap();

        let records: Vec<_> = VacancyReader::open(file.path())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records[0].currency, Currency::Kzt);
    }
}
