use crate::utils::Result;
use std::io::BufRead;

/// Row-major access to a table of text cells with a header.
pub trait Dataset {
    fn header(&self) -> &[String];

    fn num_rows(&self) -> usize;

    fn text(&self, row: usize, col: usize) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delimiter {
    Tab,
    Comma,
}

impl Delimiter {
    fn as_char(self) -> char {
        match self {
            Delimiter::Tab => '\t',
            Delimiter::Comma => ',',
        }
    }
}

impl std::str::FromStr for Delimiter {
    type Err = &'static str;
    fn from_str(delimiter: &str) -> std::result::Result<Self, Self::Err> {
        match delimiter {
            "tab" | "tsv" => Ok(Delimiter::Tab),
            "comma" | "csv" => Ok(Delimiter::Comma),
            _ => Err("Invalid delimiter. Options are: tab, comma"),
        }
    }
}

#[derive(Debug, Default)]
pub struct TextTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Reads a delimited table. The first line not starting with `#` is the
    /// header, unless the `#` line right before it has the same number of
    /// cells (more than one), as in `#id\tchr\t...`; that line is then the
    /// header with its `#` removed. All other `#` lines are comments.
    pub fn from_reader<R: BufRead>(reader: R, delimiter: Delimiter) -> Result<Self> {
        let sep = delimiter.as_char();
        let split = |line: &str| -> Vec<String> {
            line.trim_end_matches('\r')
                .split(sep)
                .map(|cell| cell.trim().to_string())
                .collect()
        };
        let mut header: Option<Vec<String>> = None;
        let mut commented_header: Option<Vec<String>> = None;
        let mut rows = Vec::new();

        for (line_number, line) in reader.lines().enumerate() {
            let line =
                line.map_err(|e| format!("Error reading line {}: {}", line_number + 1, e))?;
            if line.trim().is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                if header.is_none() {
                    commented_header = Some(split(comment));
                }
                continue;
            }
            let cells = split(&line);

            if header.is_none() {
                match commented_header.take() {
                    Some(names) if names.len() > 1 && names.len() == cells.len() => {
                        header = Some(names)
                    }
                    _ => {
                        header = Some(cells);
                        continue;
                    }
                }
            }
            let expected = header.as_ref().map_or(0, Vec::len);
            if cells.len() != expected {
                return Err(format!(
                    "Expected {} columns at line {}, found {}",
                    expected,
                    line_number + 1,
                    cells.len()
                ));
            }
            rows.push(cells);
        }

        let header = header
            .or_else(|| commented_header.filter(|names| names.len() > 1))
            .unwrap_or_default();
        Ok(Self { header, rows })
    }
}

impl Dataset for TextTable {
    fn header(&self) -> &[String] {
        &self.header
    }

    fn num_rows(&self) -> usize {
        self.rows.len()
    }

    fn text(&self, row: usize, col: usize) -> &str {
        &self.rows[row][col]
    }
}

/// Resolves each requested name to a column index, matching header names
/// case-insensitively. All missing names are reported together.
pub fn find_columns<D: Dataset + ?Sized>(dataset: &D, names: &[&str]) -> Result<Vec<usize>> {
    let mut indices = Vec::with_capacity(names.len());
    let mut missing = Vec::new();

    for name in names {
        match dataset
            .header()
            .iter()
            .position(|column| column.trim().eq_ignore_ascii_case(name.trim()))
        {
            Some(index) => indices.push(index),
            None => missing.push(*name),
        }
    }

    if !missing.is_empty() {
        return Err(format!(
            "Missing required column(s): {}",
            missing.join(", ")
        ));
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_tab_delimited_table() {
        let data = "\
# comment\n\
ID\tChr\tStart\n\
\n\
s1\tchr1\t100\n\
s2\tchr2\t200\r\n";
        let table = TextTable::from_reader(Cursor::new(data), Delimiter::Tab).unwrap();
        assert_eq!(table.header(), &["ID", "Chr", "Start"]);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.text(1, 2), "200");
    }

    #[test]
    fn hash_prefixed_header_is_kept() {
        let data = "\
# exported segments\n\
#id\tchr\tstart\n\
s1\tchr1\t100\n\
# trailing note\n\
s2\tchr2\t200\n";
        let table = TextTable::from_reader(Cursor::new(data), Delimiter::Tab).unwrap();
        assert_eq!(table.header(), &["id", "chr", "start"]);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(
            find_columns(&table, &["id", "chr", "start"]).unwrap(),
            vec![0, 1, 2]
        );

        let table =
            TextTable::from_reader(Cursor::new("#id\tchr\tstart\n"), Delimiter::Tab).unwrap();
        assert_eq!(table.header(), &["id", "chr", "start"]);
        assert_eq!(table.num_rows(), 0);
    }

    #[test]
    fn read_comma_delimited_table() {
        let data = "id,chr\ns1,chr1\n";
        let table = TextTable::from_reader(Cursor::new(data), Delimiter::Comma).unwrap();
        assert_eq!(table.text(0, 1), "chr1");
    }

    #[test]
    fn ragged_row_is_an_error() {
        let data = "id\tchr\ns1\n";
        let result = TextTable::from_reader(Cursor::new(data), Delimiter::Tab);
        assert_eq!(
            result.unwrap_err(),
            "Expected 2 columns at line 2, found 1".to_string()
        );
    }

    #[test]
    fn empty_input_has_no_header() {
        let table = TextTable::from_reader(Cursor::new(""), Delimiter::Tab).unwrap();
        assert!(table.header().is_empty());
        assert_eq!(table.num_rows(), 0);
    }

    #[test]
    fn find_columns_ignores_case() {
        let data = "Mean\tID\tCHR\n";
        let table = TextTable::from_reader(Cursor::new(data), Delimiter::Tab).unwrap();
        assert_eq!(
            find_columns(&table, &["id", "chr", "mean"]).unwrap(),
            vec![1, 2, 0]
        );
    }

    #[test]
    fn find_columns_reports_every_missing_column() {
        let data = "id\tchr\n";
        let table = TextTable::from_reader(Cursor::new(data), Delimiter::Tab).unwrap();
        assert_eq!(
            find_columns(&table, &["id", "start", "end"]),
            Err("Missing required column(s): start, end".to_string())
        );
    }
}
