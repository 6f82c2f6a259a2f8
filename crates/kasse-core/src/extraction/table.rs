use crate::extraction::PageContent;

/// Reconstruct a table from pdftotext -layout output.
///
/// This is a stream strategy: there are no ruling lines to follow, so
/// columns come from the horizontal position of the header labels and
/// every cell is placed by where its text sits on the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Index of the header line within the page.
    pub header_line: usize,
    pub rows: Vec<RawRow>,
}

/// One table line split into cells, one cell per column (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line_index: usize,
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map(|c| c.as_str()).unwrap_or("")
    }

    /// Cells joined for diagnostics.
    pub fn display(&self) -> String {
        self.cells.join(" | ")
    }
}

/// Character span of a header label on the header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnAnchor {
    start: usize,
    end: usize,
}

/// A run of text separated from its neighbours by two or more spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    start: usize,
    end: usize,
    text: String,
}

/// Locate the table whose header carries all `labels` and split the lines
/// below it into cells. Columns are returned in the order of `labels`.
///
/// Returns None when no line holds every label.
pub fn extract_stream_table(page: &PageContent, labels: &[&str]) -> Option<RawTable> {
    let (header_line, anchors) = page
        .lines
        .iter()
        .enumerate()
        .find_map(|(i, line)| header_anchors(line, labels).map(|a| (i, a)))?;

    let bounds = column_bounds(&anchors);

    let rows = page
        .lines
        .iter()
        .enumerate()
        .skip(header_line + 1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_index, line)| {
            let mut cells = vec![String::new(); labels.len()];
            for segment in split_segments(line) {
                let column = assign_column(&segment, &bounds);
                let cell = &mut cells[column];
                if !cell.is_empty() {
                    cell.push(' ');
                }
                cell.push_str(&segment.text);
            }
            RawRow { line_index, cells }
        })
        .collect();

    Some(RawTable { header_line, rows })
}

/// Labels missing from every line of the page, for error messages.
pub fn missing_labels<'a>(page: &PageContent, labels: &[&'a str]) -> Vec<&'a str> {
    labels
        .iter()
        .filter(|label| !page.lines.iter().any(|line| line.contains(**label)))
        .copied()
        .collect()
}

fn header_anchors(line: &str, labels: &[&str]) -> Option<Vec<ColumnAnchor>> {
    labels
        .iter()
        .map(|label| {
            let byte_idx = line.find(label)?;
            let start = line[..byte_idx].chars().count();
            Some(ColumnAnchor {
                start,
                end: start + label.chars().count(),
            })
        })
        .collect()
}

/// Partition the line into one region per column. The boundary between two
/// neighbouring columns is the midpoint of the gap between their labels.
/// Regions are indexed like `anchors`, so label order need not match
/// left-to-right order.
fn column_bounds(anchors: &[ColumnAnchor]) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..anchors.len()).collect();
    order.sort_by_key(|&i| anchors[i].start);

    let mut bounds = vec![(0, usize::MAX); anchors.len()];
    for (pos, &col) in order.iter().enumerate() {
        let left = if pos == 0 {
            0
        } else {
            let prev = anchors[order[pos - 1]];
            midpoint(prev.end, anchors[col].start)
        };
        let right = match order.get(pos + 1) {
            Some(&next) => midpoint(anchors[col].end, anchors[next].start),
            None => usize::MAX,
        };
        bounds[col] = (left, right);
    }
    bounds
}

fn midpoint(a: usize, b: usize) -> usize {
    if b <= a {
        a
    } else {
        a + (b - a) / 2
    }
}

/// Pick the column whose region covers most of the segment.
fn assign_column(segment: &Segment, bounds: &[(usize, usize)]) -> usize {
    let mut best = 0;
    let mut best_overlap = 0;
    for (col, &(left, right)) in bounds.iter().enumerate() {
        let overlap = segment
            .end
            .min(right)
            .saturating_sub(segment.start.max(left));
        if overlap > best_overlap {
            best = col;
            best_overlap = overlap;
        }
    }
    best
}

/// Split a line by gaps of 2+ whitespace characters, keeping char offsets.
fn split_segments(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut start = 0;
    let mut pending_spaces = 0;

    for (i, c) in line.chars().enumerate() {
        if c.is_whitespace() {
            pending_spaces += 1;
            continue;
        }

        if !current.is_empty() && pending_spaces >= 2 {
            let text = std::mem::take(&mut current);
            segments.push(Segment {
                start,
                end: start + text.chars().count(),
                text,
            });
        }

        if current.is_empty() {
            start = i;
        } else if pending_spaces == 1 {
            current.push(' ');
        }
        current.push(c);
        pending_spaces = 0;
    }

    if !current.is_empty() {
        segments.push(Segment {
            start,
            end: start + current.chars().count(),
            text: current,
        });
    }

    segments
}
