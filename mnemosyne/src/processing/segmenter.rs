/// Characters that end a sentence. The terminator stays with its sentence.
const TERMINATORS: &[char] = &['.', '!', '?'];

/// Split raw text into trimmed sentence candidates.
///
/// No abbreviation or decimal handling: `"v1.2"` splits after `"v1."`.
pub fn split_sentences(text: &str) -> Sentences<'_> {
    Sentences { rest: text }
}

/// Lazy iterator over the sentences of a text. Clone it to restart from the
/// current position.
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.rest.is_empty() {
            let (segment, rest) = match self.rest.find(TERMINATORS) {
                // Terminators are single-byte, so `idx + 1` is a char boundary.
                Some(idx) => self.rest.split_at(idx + 1),
                None => (self.rest, ""),
            };
            self.rest = rest;

            let trimmed = segment.trim();
            if !trimmed.is_empty() {
                return Some(trimmed);
            }
        }
        None
    }
}

impl std::iter::FusedIterator for Sentences<'_> {}
