//! A reader for comma separated text with a header row.

use std::io::BufRead;
use std::mem;

use super::ScheduleError;

/// Reads rows of comma separated text, looking fields up by header name.
///
/// Fields may be wrapped in double quotes, in which case they can contain commas,
/// line breaks and `""` for a literal quote. Blank lines are skipped.
pub(crate) struct Reader<R> {
    input: R,
    header: Vec<String>,
    line: usize,
}

/// One row of a table, borrowed against the header of its reader.
pub(crate) struct Row<'a> {
    header: &'a [String],
    fields: Vec<String>,
}

impl<R: BufRead> Reader<R> {
    /// Creates a reader and consumes the header row.
    /// Empty input yields a reader without columns or rows.
    pub(crate) fn new(input: R) -> Result<Self, ScheduleError> {
        let mut reader = Self {
            input,
            header: Vec::new(),
            line: 0,
        };
        if let Some(header) = reader.next_record()? {
            reader.header = header.into_iter().map(|name| name.trim().to_string()).collect();
        }
        Ok(reader)
    }

    /// Returns the next non-blank row, or `None` at the end of the input.
    pub(crate) fn next_row(&mut self) -> Result<Option<Row<'_>>, ScheduleError> {
        let fields = self.next_record()?;
        Ok(fields.map(|fields| Row {
            header: &self.header,
            fields,
        }))
    }

    fn next_record(&mut self) -> Result<Option<Vec<String>>, ScheduleError> {
        loop {
            let Some(text) = self.read_line()? else {
                return Ok(None);
            };
            if text.is_empty() {
                tracing::trace!(line = self.line, "skipping blank line");
                continue;
            }
            let start_line = self.line;
            return self.split_record(text, start_line).map(Some);
        }
    }

    fn split_record(&mut self, mut text: String, start_line: usize) -> Result<Vec<String>, ScheduleError> {
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut at_field_start = true;
        loop {
            let mut chars = text.chars().peekable();
            while let Some(c) = chars.next() {
                if in_quotes {
                    if c != '"' {
                        field.push(c);
                    } else if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    match c {
                        ',' => {
                            fields.push(mem::take(&mut field));
                            at_field_start = true;
                            continue;
                        }
                        '"' if at_field_start => in_quotes = true,
                        c => field.push(c),
                    }
                }
                at_field_start = false;
            }
            if !in_quotes {
                break;
            }

            // Quoted field continues on the next line
            field.push('\n');
            text = match self.read_line()? {
                Some(text) => text,
                None => return Err(ScheduleError::UnterminatedQuote { line: start_line }),
            };
        }
        fields.push(field);
        Ok(fields)
    }

    fn read_line(&mut self) -> Result<Option<String>, ScheduleError> {
        let mut text = String::new();
        if self.input.read_line(&mut text)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        if text.ends_with('\n') {
            text.pop();
            if text.ends_with('\r') {
                text.pop();
            }
        }
        if self.line == 1 {
            if let Some(stripped) = text.strip_prefix('\u{feff}') {
                text = stripped.to_string();
            }
        }
        Ok(Some(text))
    }
}

impl Row<'_> {
    /// Returns the field under the named column.
    /// A missing column or a short row reads as an empty field.
    pub(crate) fn get(&self, name: &str) -> &str {
        self.header
            .iter()
            .position(|column| column == name)
            .and_then(|index| self.fields.get(index))
            .map_or("", String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(input: &str) -> Vec<Vec<String>> {
        let mut reader = Reader::new(input.as_bytes()).unwrap();
        let mut rows = Vec::new();
        while let Some(row) = reader.next_row().unwrap() {
            rows.push(row.fields);
        }
        rows
    }

    #[test]
    fn test_header_lookup() {
        let mut reader = Reader::new("\u{feff}Subject,Catalog\r\nCSC,223\r\n".as_bytes()).unwrap();
        let row = reader.next_row().unwrap().unwrap();
        assert_eq!(row.get("Subject"), "CSC");
        assert_eq!(row.get("Catalog"), "223");
        assert_eq!(row.get("Title"), "");
        assert!(reader.next_row().unwrap().is_none());
    }

    #[test]
    fn test_short_row() {
        let mut reader = Reader::new("A,B,C\n1\n".as_bytes()).unwrap();
        let row = reader.next_row().unwrap().unwrap();
        assert_eq!(row.get("A"), "1");
        assert_eq!(row.get("C"), "");
    }

    #[test]
    fn test_quoted_fields() {
        let rows = rows("h1,h2,h3\n\"a, b\",\"say \"\"hi\"\"\",x\"y\n");
        assert_eq!(rows, vec![vec!["a, b", "say \"hi\"", "x\"y"]]);
    }

    #[test]
    fn test_multiline_quoted_field() {
        let rows = rows("h1,h2\n\"first\nsecond\",z\n");
        assert_eq!(rows, vec![vec!["first\nsecond", "z"]]);
    }

    #[test]
    fn test_blank_lines_and_empty_fields() {
        let rows = rows("h1,h2\n\n,\n\nq,\n");
        assert_eq!(rows, vec![vec!["", ""], vec!["q", ""]]);
    }

    #[test]
    fn test_empty_input() {
        assert!(rows("").is_empty());
    }

    #[test]
    fn test_unterminated_quote() {
        let mut reader = Reader::new("h1\nok\n\"open\nstill open\n".as_bytes()).unwrap();
        assert!(reader.next_row().unwrap().is_some());
        match reader.next_row() {
            Err(ScheduleError::UnterminatedQuote { line }) => assert_eq!(line, 3),
            _ => panic!("expected an unterminated quote error"),
        }
    }
}
