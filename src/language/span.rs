use miette::SourceSpan;

/// Half-open byte range into the program source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

/// Maps byte offsets to 1-based line numbers.
#[derive(Clone, Debug)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, byte)| *byte == b'\n')
                .map(|(offset, _)| offset + 1),
        );
        Self { line_starts }
    }

    pub fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|start| *start <= offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_map_to_one_based_lines() {
        let index = LineIndex::new("clear X;\nincr X;\n\ndecr X;");
        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_of(8), 1);
        assert_eq!(index.line_of(9), 2);
        assert_eq!(index.line_of(17), 3);
        assert_eq!(index.line_of(18), 4);
    }

    #[test]
    fn empty_source_is_line_one() {
        let index = LineIndex::new("");
        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_of(42), 1);
    }
}
