//! Reading and writing patterns in the RLE format.
//!
//! A pattern is a header followed by runs of cells, `b` for dead and `o` for alive,
//! each optionally prefixed by a count. `$` ends a row and `!` ends the pattern.
//!
//! ```text
//! #N Glider
//! x = 3, y = 3, rule = B3/S23
//! bo$2bo$3o!
//! ```

use crate::boundary::{find_boundary, BoundingBox};
use crate::cell::Cell;
use crate::error::{BoundaryError, DecodeError};
use crate::grid::Grid;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// No line written by the encoder is longer than this.
pub const MAX_LINE_LENGTH: usize = 70;

/// The largest number of cells, and the longest side, a decoded pattern may declare.
pub const MAX_PATTERN_CELLS: usize = 1 << 28;

/// Spellings of the B3/S23 rule, in lowercase.
const LIFE_RULES: [&str; 4] = ["b3/s23", "life", "23/3", "s23/b3"];

/// The `x = <width>, y = <height>[, rule = <rule>]` line of a pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RleHeader {
    pub width: usize,
    pub height: usize,
    /// Kept as written. Only B3/S23 is simulated whatever this says.
    pub rule: Option<String>,
}

/// A decoded pattern along with the metadata found in its comment lines.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RlePattern {
    /// The name from a `#N` line.
    pub name: Option<String>,
    /// Every other `#` line, without the leading `#`, in order.
    pub comments: Vec<String>,
    pub header: RleHeader,
    pub grid: Grid,
}

impl RlePattern {
    /// Encodes the pattern, writing its name and comments before the header.
    pub fn to_rle(&self) -> String {
        let mut rle = String::new();
        if let Some(name) = &self.name {
            rle.push_str(&format!("#N {name}\n"));
        }
        for comment in &self.comments {
            rle.push_str(&format!("#{comment}\n"));
        }
        rle.push_str(&write_grid(&self.grid, self.header.rule.as_deref()));
        rle
    }
}

/// Decodes an RLE pattern into a grid of the declared width and height.
pub fn decode(text: &str) -> Result<Grid, DecodeError> {
    decode_pattern(text).map(|pattern| pattern.grid)
}

/// Decodes an RLE pattern, keeping its header and comments.
pub fn decode_pattern(text: &str) -> Result<RlePattern, DecodeError> {
    let mut name = None;
    let mut comments = Vec::new();
    let mut decoder: Option<BodyDecoder> = None;

    for (index, line) in text.lines().enumerate() {
        let number = index + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            let pattern_name = comment
                .strip_prefix('N')
                .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace));
            match pattern_name {
                Some(pattern_name) => name = Some(pattern_name.trim().to_string()),
                None => comments.push(comment.to_string()),
            }
            continue;
        }

        if let Some(body) = decoder.as_mut() {
            // Anything after the end of the pattern is ignored
            if body.feed(line, number)? {
                break;
            }
        } else {
            decoder = Some(BodyDecoder::new(parse_header(line, number)?));
        }
    }

    let body = decoder.ok_or(DecodeError::MissingHeader)?;
    let header = body.header.clone();
    let grid = body.finish()?;

    Ok(RlePattern {
        name,
        comments,
        header,
        grid,
    })
}

/// Encodes the part of `grid` inside `bbox` as an RLE pattern.
///
/// The header declares the size of the box. Lines are wrapped so none is longer than
/// [`MAX_LINE_LENGTH`], and a run is never split across two lines.
pub fn encode(grid: &Grid, bbox: &BoundingBox) -> Result<String, BoundaryError> {
    bbox.check(grid)?;
    Ok(write_pattern(grid, bbox, None))
}

/// Encodes the live part of `grid` as an RLE pattern.
///
/// A grid without live cells is written as an empty `x = 0, y = 0` pattern.
pub fn encode_grid(grid: &Grid) -> String {
    write_grid(grid, None)
}

fn parse_header(line: &str, number: usize) -> Result<RleHeader, DecodeError> {
    if !line.starts_with('x') {
        return Err(DecodeError::HeaderExpected {
            line: number,
            text: line.to_string(),
        });
    }

    let invalid = || DecodeError::InvalidHeader {
        line: number,
        text: line.to_string(),
    };

    let captures = header_pattern().captures(line).ok_or_else(invalid)?;
    let width: usize = captures[1].parse().map_err(|_| invalid())?;
    let height: usize = captures[2].parse().map_err(|_| invalid())?;

    let fits = width.max(height) <= MAX_PATTERN_CELLS
        && width
            .checked_mul(height)
            .is_some_and(|cells| cells <= MAX_PATTERN_CELLS);
    if !fits {
        return Err(DecodeError::PatternTooLarge {
            line: number,
            width,
            height,
        });
    }
    let rule = captures.get(3).map(|rule| rule.as_str().to_string());

    if let Some(rule) = &rule {
        if !LIFE_RULES.contains(&rule.to_ascii_lowercase().as_str()) {
            warn!(rule = %rule, "Only B3/S23 is supported, ignoring the pattern's rule");
        }
    }
    debug!(width, height, "Parsed RLE header");

    Ok(RleHeader {
        width,
        height,
        rule,
    })
}

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^x\s*=\s*(\d+)\s*,\s*y\s*=\s*(\d+)\s*(?:,\s*rule\s*=\s*(\S+)\s*)?$")
            .expect("the header pattern is a valid regex")
    })
}

/// A run count being read, with where it started.
struct PendingCount {
    value: usize,
    line: usize,
    column: usize,
}

/// Turns the pattern lines following the header into rows of cells.
///
/// Lines are fed one at a time but form a single stream, so a run may continue on the next line.
struct BodyDecoder {
    header: RleHeader,
    cells: Vec<Cell>,
    row: Vec<Cell>,
    rows: usize,
    count: Option<PendingCount>,
    started: bool,
}

impl BodyDecoder {
    fn new(header: RleHeader) -> BodyDecoder {
        BodyDecoder {
            header,
            cells: Vec::new(),
            row: Vec::new(),
            rows: 0,
            count: None,
            started: false,
        }
    }

    /// Returns `true` once the end of the pattern is reached.
    fn feed(&mut self, line: &str, number: usize) -> Result<bool, DecodeError> {
        for (index, character) in line.chars().enumerate() {
            let column = index + 1;
            match character {
                '0'..='9' => self.push_digit(character as usize - '0' as usize, number, column)?,
                '$' => {
                    for _ in 0..self.take_count()? {
                        self.end_row(number, column)?;
                    }
                }
                '!' => {
                    if self.count.is_some() {
                        return Err(DecodeError::MisplacedCount {
                            line: number,
                            column,
                            character,
                        });
                    }
                    return Ok(true);
                }
                _ => match Cell::from_tag(character) {
                    Some(cell) => {
                        let count = self.take_count()?;
                        self.push_run(cell, count, number, column)?;
                    }
                    None if character.is_whitespace() && self.count.is_none() => {}
                    None => {
                        return Err(DecodeError::UnexpectedCharacter {
                            line: number,
                            column,
                            character,
                        });
                    }
                },
            }
        }

        Ok(false)
    }

    fn push_digit(&mut self, digit: usize, line: usize, column: usize) -> Result<(), DecodeError> {
        let count = self.count.get_or_insert(PendingCount {
            value: 0,
            line,
            column,
        });

        count.value = count
            .value
            .checked_mul(10)
            .and_then(|value| value.checked_add(digit))
            .ok_or(DecodeError::InvalidCount {
                line: count.line,
                column: count.column,
            })?;

        Ok(())
    }

    /// The count for the next run, 1 when none was written.
    fn take_count(&mut self) -> Result<usize, DecodeError> {
        match self.count.take() {
            None => Ok(1),
            Some(count) if count.value == 0 => Err(DecodeError::InvalidCount {
                line: count.line,
                column: count.column,
            }),
            Some(count) => Ok(count.value),
        }
    }

    fn push_run(
        &mut self,
        cell: Cell,
        count: usize,
        line: usize,
        column: usize,
    ) -> Result<(), DecodeError> {
        self.started = true;

        if count > self.header.width - self.row.len() {
            return Err(DecodeError::RowTooLong {
                line,
                column,
                row: self.rows + 1,
                width: self.header.width,
            });
        }

        self.row.resize(self.row.len() + count, cell);
        Ok(())
    }

    fn end_row(&mut self, line: usize, column: usize) -> Result<(), DecodeError> {
        self.started = true;

        if self.rows == self.header.height {
            return Err(DecodeError::TooManyRows {
                line,
                column,
                height: self.header.height,
            });
        }

        self.close_row();
        Ok(())
    }

    /// Pads the current row with dead cells up to the width and starts a new one.
    fn close_row(&mut self) {
        self.row.resize(self.header.width, Cell::Dead);
        self.cells.append(&mut self.row);
        self.rows += 1;
    }

    fn finish(mut self) -> Result<Grid, DecodeError> {
        if let Some(count) = self.count.take() {
            return Err(DecodeError::InvalidCount {
                line: count.line,
                column: count.column,
            });
        }

        let (width, height) = (self.header.width, self.header.height);

        // A `$` right before `!` does not open an extra row once the height is reached
        if self.started && (!self.row.is_empty() || self.rows < height) {
            if self.rows == height {
                return Err(DecodeError::RowCountMismatch {
                    expected: height,
                    found: self.rows + 1,
                });
            }
            self.close_row();
        }

        if self.rows != height {
            return Err(DecodeError::RowCountMismatch {
                expected: height,
                found: self.rows,
            });
        }

        Grid::from_cells(width, height, self.cells).ok_or(DecodeError::RowCountMismatch {
            expected: height,
            found: self.rows,
        })
    }
}

/// A run of identical cells or a terminator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Token {
    Run(Cell, usize),
    RowEnd,
    PatternEnd,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Run(cell, 1) => write!(f, "{}", cell.tag()),
            Token::Run(cell, count) => write!(f, "{count}{}", cell.tag()),
            Token::RowEnd => f.write_str("$"),
            Token::PatternEnd => f.write_str("!"),
        }
    }
}

fn tokenize(grid: &Grid, bbox: &BoundingBox) -> Vec<Token> {
    let mut tokens = Vec::new();

    for row in bbox.top..=bbox.bottom {
        for &cell in &grid.row(row)[bbox.min_col..=bbox.max_col] {
            if let Some(Token::Run(last, count)) = tokens.last_mut() {
                if *last == cell {
                    *count += 1;
                    continue;
                }
            }
            tokens.push(Token::Run(cell, 1));
        }

        tokens.push(if row == bbox.bottom {
            Token::PatternEnd
        } else {
            Token::RowEnd
        });
    }

    // The decoder pads the last row with dead cells
    if matches!(tokens.as_slice(), [.., Token::Run(Cell::Dead, _), Token::PatternEnd]) {
        tokens.remove(tokens.len() - 2);
    }

    tokens
}

fn write_grid(grid: &Grid, rule: Option<&str>) -> String {
    match find_boundary(grid) {
        Some(bbox) => write_pattern(grid, &bbox, rule),
        None => format!("{}!\n", write_header(0, 0, rule)),
    }
}

fn write_header(width: usize, height: usize, rule: Option<&str>) -> String {
    match rule {
        Some(rule) => format!("x = {width}, y = {height}, rule = {rule}\n"),
        None => format!("x = {width}, y = {height}\n"),
    }
}

/// Writes the header and the wrapped runs. `bbox` must fit in `grid`.
fn write_pattern(grid: &Grid, bbox: &BoundingBox, rule: Option<&str>) -> String {
    let mut rle = write_header(bbox.width(), bbox.height(), rule);
    let mut line = String::new();

    for token in tokenize(grid, bbox) {
        let text = token.to_string();
        if !line.is_empty() && line.len() + text.len() > MAX_LINE_LENGTH {
            rle.push_str(&line);
            rle.push('\n');
            line.clear();
        }
        line.push_str(&text);
    }

    rle.push_str(&line);
    rle.push('\n');
    rle
}
