//! Classification of a single dataset line.

/// Marker that identifies the second token of a label line.
const URL_MARKER: &str = "http";

/// What a dataset line contains
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or whitespace-only
    Blank,
    /// `<id> <url>`
    Label(u32, &'a str),
    /// `<src> <dst>`
    Edge(u32, u32),
    /// Anything else; dropped without error
    Unrecognized,
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Classify one line. Tokens are separated by whitespace or commas.
pub fn classify(line: &str) -> Line<'_> {
    let mut tokens = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());

    let Some(first) = tokens.next() else {
        return Line::Blank;
    };
    let Some(second) = tokens.next() else {
        return Line::Unrecognized;
    };

    if second.contains(URL_MARKER) {
        return match first.parse() {
            Ok(id) => Line::Label(id, second),
            Err(_) => Line::Unrecognized,
        };
    }

    if tokens.next().is_none() && is_digits(first) && is_digits(second) {
        if let (Ok(src), Ok(dst)) = (first.parse(), second.parse()) {
            return Line::Edge(src, dst);
        }
    }

    Line::Unrecognized
}
