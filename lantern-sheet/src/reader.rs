use std::str::Chars;

/// One CSV record together with the (1-based) source line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

impl Record {
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }
}

/// Splits sheet exports into records.
///
/// Handles `\n` and `\r\n` line endings, quoted fields (which may contain commas and
/// newlines) and doubled quotes inside quoted fields. Fields are not trimmed here.
pub struct RecordReader<'a> {
    chars: std::iter::Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(src: &'a str) -> Self {
        // BOM from spreadsheet exports
        let src = src.strip_prefix('\u{feff}').unwrap_or(src);
        RecordReader { chars: src.chars().peekable(), line: 1 }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    pub fn run(mut self) -> Vec<Record> {
        let mut records = Vec::new();
        while let Some(record) = self.record() {
            records.push(record);
        }
        records
    }

    fn record(&mut self) -> Option<Record> {
        self.peek()?;
        let line = self.line;
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;

        while let Some(c) = self.advance() {
            if in_quotes {
                match c {
                    '"' if self.peek() == Some(&'"') => {
                        self.advance();
                        field.push('"');
                    }
                    '"' => in_quotes = false,
                    _ => field.push(c),
                }
                continue;
            }
            match c {
                '"' if field.trim().is_empty() => {
                    field.clear();
                    in_quotes = true;
                }
                ',' => fields.push(std::mem::take(&mut field)),
                '\r' if self.peek() == Some(&'\n') => {}
                '\n' | '\r' => break,
                _ => field.push(c),
            }
        }
        fields.push(field);
        Some(Record { line, fields })
    }
}
