use memchr::Memchr2;

/// One token of a `mappings` string: the text between two separators and
/// whether the separator that follows it ends the current generated line.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct SegmentToken<'a> {
    pub text: &'a str,
    pub ends_line: bool,
}

/// Splits a `mappings` string on `;` and `,` in a single memchr pass.
///
/// Every slot between separators is yielded, including empty ones, so the
/// caller observes empty lines and tolerated empty segments.
#[derive(Debug)]
pub(crate) struct SegmentSplitter<'a> {
    text: &'a str,
    head: usize,
    separators: Memchr2<'a>,
}

impl<'a> SegmentSplitter<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            head: 0,
            separators: memchr::memchr2_iter(b';', b',', text.as_bytes()),
        }
    }
}

impl<'a> Iterator for SegmentSplitter<'a> {
    type Item = SegmentToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.head > self.text.len() {
            return None;
        }
        Some(match self.separators.next() {
            Some(at) => {
                let token = SegmentToken {
                    text: &self.text[self.head..at],
                    ends_line: self.text.as_bytes()[at] == b';',
                };
                self.head = at + 1;
                token
            }
            None => {
                let token = SegmentToken {
                    text: &self.text[self.head..],
                    ends_line: false,
                };
                self.head = self.text.len() + 1;
                token
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::SegmentSplitter;

    #[test]
    fn test_splitter() {
        let rendered = SegmentSplitter::new("AAAA,CAAC;;QACf,CAAC")
            .map(|t| format!("[{}|{}]", t.text, t.ends_line))
            .collect::<String>();
        insta::assert_snapshot!(rendered, @"[AAAA|false][CAAC|true][|true][QACf|false][CAAC|false]");
    }

    #[test]
    fn test_splitter_empty_input_yields_one_empty_token() {
        let tokens: Vec<_> = SegmentSplitter::new("").collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "");
        assert!(!tokens[0].ends_line);
    }
}
