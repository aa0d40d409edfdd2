use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::reader::{Record, RecordReader};
use crate::row::{ChoiceOption, Command, Highlight, LoadMode, ScriptRow, Side};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SheetError {
    #[error("sheet has no header row")]
    Empty,
    #[error("sheet header is missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("line {line}: {msg}")]
    MalformedRow { line: usize, msg: String },
    #[error("invalid scene reference [{0}], expected 'scene' or 'scene.branch'")]
    InvalidSceneRef(String),
}

/// Result of parsing a sheet: the rows that made it, and the ones that did not.
#[derive(Debug, Default, Clone)]
pub struct Sheet {
    pub rows: Vec<ScriptRow>,
    pub skipped: Vec<SheetError>,
}

/// Parses a CSV export. Malformed records are skipped and reported in
/// [`Sheet::skipped`]; only an unusable header fails the whole sheet.
pub fn parse_sheet(src: &str) -> Result<Sheet, SheetError> {
    let records = RecordReader::new(src).run();
    SheetParser::new(&records)?.parse()
}

static OPTION_COL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(option|target)\s*(\d+)$").expect("valid regex"));
static PACKED_OPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+):\s*(-?\d+)$").expect("valid regex"));

#[derive(Debug, Default)]
struct Columns {
    id: usize,
    command: usize,
    branch: Option<usize>,
    seq: Option<usize>,
    side: Option<usize>,
    character: Option<usize>,
    load_mode: Option<usize>,
    highlight: Option<usize>,
    bg: Option<usize>,
    cg: Option<usize>,
    name: Option<usize>,
    dialogue: Option<usize>,
    options: Option<usize>,
    // option n -> (text column, target column)
    numbered: BTreeMap<u32, (Option<usize>, Option<usize>)>,
    width: usize,
}

impl Columns {
    fn from_header(header: &Record) -> Result<Self, SheetError> {
        let mut id = None;
        let mut command = None;
        let mut cols = Columns { width: header.fields.len(), ..Default::default() };

        for (idx, raw) in header.fields.iter().enumerate() {
            let name = raw.trim();
            if let Some(caps) = OPTION_COL.captures(name) {
                let n: u32 = caps[2].parse().unwrap_or(0);
                let slot = cols.numbered.entry(n).or_default();
                if caps[1].eq_ignore_ascii_case("option") {
                    slot.0 = Some(idx);
                } else {
                    slot.1 = Some(idx);
                }
                continue;
            }
            match name.to_ascii_lowercase().as_str() {
                "id" | "scene" | "sceneid" => id = Some(idx),
                "command" => command = Some(idx),
                "branch" | "branchid" => cols.branch = Some(idx),
                "seq" | "lineno" => cols.seq = Some(idx),
                "characterside" | "side" => cols.side = Some(idx),
                "characterkey" | "character" => cols.character = Some(idx),
                "loadmode" => cols.load_mode = Some(idx),
                "highlight" | "hightlight" => cols.highlight = Some(idx),
                "bg" | "background" => cols.bg = Some(idx),
                "cg" => cols.cg = Some(idx),
                "name" | "speaker" => cols.name = Some(idx),
                "dialogue" | "line" => cols.dialogue = Some(idx),
                "options" => cols.options = Some(idx),
                "" => {}
                other => log::debug!("Ignoring unknown sheet column '{}'", other),
            }
        }

        cols.id = id.ok_or(SheetError::MissingColumn("ID"))?;
        cols.command = command.ok_or(SheetError::MissingColumn("Command"))?;
        Ok(cols)
    }
}

struct SheetParser<'a> {
    records: &'a [Record],
    cols: Columns,
}

impl<'a> SheetParser<'a> {
    fn new(records: &'a [Record]) -> Result<Self, SheetError> {
        let header = records.first().ok_or(SheetError::Empty)?;
        let cols = Columns::from_header(header)?;
        Ok(Self { records: &records[1..], cols })
    }

    fn parse(self) -> Result<Sheet, SheetError> {
        let mut sheet = Sheet::default();
        log::debug!("Parsing sheet: {} records (excluding header)", self.records.len());

        for record in self.records {
            if record.is_blank() {
                continue;
            }
            match self.row(record) {
                Ok(row) => sheet.rows.push(row),
                Err(e) => {
                    log::warn!("Skipped sheet row: {}", e);
                    sheet.skipped.push(e);
                }
            }
        }
        Ok(sheet)
    }

    fn row(&self, record: &Record) -> Result<ScriptRow, SheetError> {
        let line = record.line;
        let malformed = |msg: String| SheetError::MalformedRow { line, msg };

        if record.fields.len() < self.cols.width {
            return Err(malformed(format!(
                "insufficient fields ({} of {})",
                record.fields.len(),
                self.cols.width
            )));
        }

        let field = |idx: Option<usize>| cell(record, idx);

        let id_raw = field(Some(self.cols.id));
        let scene_id: i32 = id_raw
            .parse()
            .map_err(|_| malformed(format!("failed to parse ID [{}]", id_raw)))?;

        let branch_raw = field(self.cols.branch);
        let branch_id: i32 = if branch_raw.is_empty() {
            0
        } else {
            branch_raw
                .parse()
                .map_err(|_| malformed(format!("failed to parse branch [{}]", branch_raw)))?
        };

        let seq_raw = field(self.cols.seq);
        let seq = if seq_raw.is_empty() {
            None
        } else {
            Some(
                seq_raw
                    .parse::<u32>()
                    .map_err(|_| malformed(format!("failed to parse seq [{}]", seq_raw)))?,
            )
        };

        let command = Command::from(field(Some(self.cols.command)));
        let mut options = self.options(record).map_err(malformed)?;

        if command == Command::SetOption {
            if options.len() < 2 {
                return Err(malformed(format!(
                    "SetOption needs at least two options, found {}",
                    options.len()
                )));
            }
        } else if !options.is_empty() {
            log::warn!("Line {}: options on a {:?} row are ignored", line, command);
            options.clear();
        }

        let optional = |s: &str| (!s.is_empty()).then(|| s.to_string());

        Ok(ScriptRow {
            scene_id,
            branch_id,
            seq,
            command,
            side: Side::from(field(self.cols.side)),
            character_key: field(self.cols.character).to_string(),
            load_mode: LoadMode::from(field(self.cols.load_mode)),
            highlight: Highlight::from(field(self.cols.highlight)),
            background: optional(field(self.cols.bg)),
            cg: optional(field(self.cols.cg)),
            speaker: field(self.cols.name).to_string(),
            line: field(self.cols.dialogue).to_string(),
            options,
        })
    }

    /// Collects options from `Option<n>`/`Target<n>` column pairs, then from a packed
    /// `Options` column (`text:target|text:target`).
    fn options(&self, record: &Record) -> Result<Vec<ChoiceOption>, String> {
        let field = |idx: Option<usize>| cell(record, idx);
        let mut out = Vec::new();

        for (n, (text_col, target_col)) in &self.cols.numbered {
            let text = field(*text_col);
            let target = field(*target_col);
            if text.is_empty() && target.is_empty() {
                continue;
            }
            let target_branch = target
                .parse()
                .map_err(|_| format!("option {} has invalid target [{}]", n, target))?;
            out.push(ChoiceOption::new(text, target_branch));
        }

        let packed = field(self.cols.options);
        for part in packed.split('|').map(str::trim).filter(|p| !p.is_empty()) {
            let caps = PACKED_OPTION
                .captures(part)
                .ok_or_else(|| format!("option [{}] is not 'text:target'", part))?;
            let target_branch = caps[2]
                .parse()
                .map_err(|_| format!("option [{}] has invalid target", part))?;
            out.push(ChoiceOption::new(caps[1].trim(), target_branch));
        }

        Ok(out)
    }
}

fn cell(record: &Record, idx: Option<usize>) -> &str {
    idx.and_then(|i| record.fields.get(i)).map(|s| s.trim()).unwrap_or("")
}
