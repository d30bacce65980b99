use regex::{Regex, RegexBuilder};

/// A run of text, marked when it is a query token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

impl<'a> Segment<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            highlighted: false,
        }
    }
}

/// Splits text around query tokens. Build once per query, apply to every field.
#[derive(Debug, Clone)]
pub struct Highlighter {
    tokens: Vec<String>,
    pattern: Option<Regex>,
}

impl Highlighter {
    pub fn new(tokens: &[String]) -> Self {
        let mut ordered: Vec<&String> = tokens.iter().filter(|t| !t.is_empty()).collect();
        // Longest first so "dogs" wins over "dog" inside the alternation.
        ordered.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        ordered.dedup();

        let pattern = if ordered.is_empty() {
            None
        } else {
            let alternation = ordered
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            RegexBuilder::new(&format!("({})", alternation))
                .case_insensitive(true)
                .build()
                .ok()
        };

        Self {
            tokens: tokens.to_vec(),
            pattern,
        }
    }

    pub fn highlight<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        if text.is_empty() {
            return Vec::new();
        }
        let Some(pattern) = &self.pattern else {
            return vec![Segment::plain(text)];
        };

        let mut segments = Vec::new();
        let mut last = 0;
        for m in pattern.find_iter(text) {
            if m.start() > last {
                segments.push(Segment::plain(&text[last..m.start()]));
            }
            let lowered = m.as_str().to_lowercase();
            segments.push(Segment {
                text: m.as_str(),
                highlighted: self.tokens.iter().any(|t| *t == lowered),
            });
            last = m.end();
        }
        if last < text.len() {
            segments.push(Segment::plain(&text[last..]));
        }
        segments
    }
}

/// One-off convenience over [`Highlighter`].
pub fn highlight<'a>(text: &'a str, tokens: &[String]) -> Vec<Segment<'a>> {
    Highlighter::new(tokens).highlight(text)
}
