// Word wrapping - Reflows text into lines that fit a character budget
//
// The budget is counted in narrow-glyph equivalents. Narrow glyphs count as
// one character; wide glyphs (anything that takes three or more bytes in
// UTF-8, which covers CJK, kana and hangul) count as `wide_glyph_width`
// percent of a narrow one. This lets a fixed character budget approximate
// how much room the text really takes once it is drawn with a proportional
// font.
//
// Lines are broken at whitespace, or right before/after a wide glyph since
// CJK text has no spaces to break at. Words are never split.

/// Weight of a narrow glyph, in hundredths of a character
const NARROW_WEIGHT: usize = 100;

/// Buffer capacity to reserve for the wrapped form of `len` bytes of text
///
/// Breaks either replace whitespace or sit next to a glyph that takes at
/// least three bytes, so 1.5x the input length always has room for them.
#[inline]
pub const fn wrapped_capacity(len: usize) -> usize {
    len + len / 2
}

/// Check whether a glyph counts as wide
#[inline]
pub fn is_wide_glyph(c: char) -> bool {
    c.len_utf8() >= 3
}

#[inline]
fn glyph_weight(c: char, wide_glyph_width: u32) -> usize {
    if is_wide_glyph(c) {
        wide_glyph_width as usize
    } else {
        NARROW_WEIGHT
    }
}

/// Weighted length of a line, in hundredths of a character
///
/// # Arguments
/// * `line` - Text of a single line
/// * `wide_glyph_width` - Width of a wide glyph as a percentage of a narrow one
///
/// # Example
///
/// ```
/// use duoscreen::text::line_weight;
///
/// assert_eq!(line_weight("abc", 150), 300);
/// assert_eq!(line_weight("日本", 150), 300);
/// ```
pub fn line_weight(line: &str, wide_glyph_width: u32) -> usize {
    line.chars().map(|c| glyph_weight(c, wide_glyph_width)).sum()
}

/// An unbreakable piece of text plus the whitespace in front of it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Atom<'a> {
    lead: &'a str,
    text: &'a str,
}

/// Split one hard line into atoms, returning them along with any trailing whitespace
///
/// An atom is either a single wide glyph or a maximal run of narrow
/// non-whitespace glyphs.
fn split_atoms(line: &str) -> (Vec<Atom<'_>>, &str) {
    let mut atoms = Vec::new();
    let mut pos = 0;

    while pos < line.len() {
        let start = line[pos..]
            .find(|c: char| !c.is_whitespace())
            .map_or(line.len(), |i| pos + i);

        let Some(first) = line[start..].chars().next() else {
            return (atoms, &line[pos..]);
        };

        let end = if is_wide_glyph(first) {
            start + first.len_utf8()
        } else {
            line[start..]
                .find(|c: char| c.is_whitespace() || is_wide_glyph(c))
                .map_or(line.len(), |i| start + i)
        };

        atoms.push(Atom {
            lead: &line[pos..start],
            text: &line[start..end],
        });
        pos = end;
    }

    (atoms, "")
}

/// Wrap text so that no line exceeds the character budget
///
/// Uses a greedy fill: an atom stays on the current line as long as the line
/// still fits afterwards, including when it fills the budget exactly. A single
/// atom wider than the budget gets a line of its own and is left intact.
/// Newlines already present in `text` are kept as hard breaks.
///
/// # Arguments
/// * `text` - Text to wrap
/// * `line_width` - Maximum line length, in narrow-glyph equivalents
/// * `wide_glyph_width` - Width of a wide glyph as a percentage of a narrow one
/// * `max_lines` - Maximum number of lines to produce (0 = unlimited); text
///   past the last line is dropped
///
/// # Returns
/// The wrapped text
///
/// # Example
///
/// ```
/// use duoscreen::text::word_wrap;
///
/// let wrapped = word_wrap("Game Boy Advance BIOS not found", 10, 150, 0);
/// assert_eq!(wrapped, "Game Boy\nAdvance\nBIOS not\nfound");
/// ```
pub fn word_wrap(text: &str, line_width: usize, wide_glyph_width: u32, max_lines: usize) -> String {
    let mut wrapped = String::with_capacity(wrapped_capacity(text.len()));
    let budget = line_width.saturating_mul(NARROW_WEIGHT);
    let mut lines = 0;

    'hard_lines: for (index, hard_line) in text.split('\n').enumerate() {
        if index > 0 {
            if max_lines > 0 && lines >= max_lines {
                break;
            }
            wrapped.push('\n');
        }
        lines += 1;

        let (atoms, trailing) = split_atoms(hard_line);
        let mut weight = 0;
        let mut line_empty = true;

        for atom in atoms {
            let lead_weight = line_weight(atom.lead, wide_glyph_width);
            let atom_weight = line_weight(atom.text, wide_glyph_width);

            if line_empty {
                // Leading indentation only survives if it fits
                if lead_weight + atom_weight <= budget {
                    wrapped.push_str(atom.lead);
                    weight += lead_weight;
                }
                wrapped.push_str(atom.text);
                weight += atom_weight;
                line_empty = false;
            } else if weight + lead_weight + atom_weight <= budget {
                wrapped.push_str(atom.lead);
                wrapped.push_str(atom.text);
                weight += lead_weight + atom_weight;
            } else {
                if max_lines > 0 && lines >= max_lines {
                    break 'hard_lines;
                }
                wrapped.push('\n');
                wrapped.push_str(atom.text);
                weight = atom_weight;
                lines += 1;
            }
        }

        if weight + line_weight(trailing, wide_glyph_width) <= budget {
            wrapped.push_str(trailing);
        }
    }

    wrapped
}
