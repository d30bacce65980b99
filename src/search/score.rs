//! Query tokenisation and keyword scoring

use super::{Catalog, Document};

const TITLE_WEIGHT: u32 = 6;
const TAG_WEIGHT: u32 = 3;
const BLURB_WEIGHT: u32 = 2;
const URL_WEIGHT: u32 = 1;
const PHRASE_BONUS: u32 = 4;

/// Lowercases and splits on every run of characters outside `[a-z0-9+]`.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '+'))
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// A tokenised query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub tokens: Vec<String>,
    /// Tokens re-joined with single spaces
    pub phrase: String,
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        let tokens = tokenize(raw);
        let phrase = tokens.join(" ");
        Self { tokens, phrase }
    }

    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Relevance of `doc` for `query`. Zero means no match.
pub fn score(doc: &Document, query: &Query) -> u32 {
    if query.is_blank() {
        return 0;
    }

    let title = doc.title.to_lowercase();
    let blurb = doc.blurb.to_lowercase();
    let url = doc.url.to_lowercase();
    let tags: Vec<String> = doc.tags.iter().map(|t| t.to_lowercase()).collect();

    let mut total = 0;
    for token in &query.tokens {
        let token = token.as_str();
        if title.contains(token) {
            total += TITLE_WEIGHT;
        }
        if tags.iter().any(|tag| tag.contains(token)) {
            total += TAG_WEIGHT;
        }
        if blurb.contains(token) {
            total += BLURB_WEIGHT;
        }
        if url.contains(token) {
            total += URL_WEIGHT;
        }
    }

    if title.contains(&query.phrase) {
        total += PHRASE_BONUS;
    }
    total
}

/// A document paired with its relevance, dropped once results are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredDocument<'a> {
    pub document: &'a Document,
    pub score: u32,
}

/// Outcome of one search. A blank query and a query that matched nothing are
/// different states and render differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    Blank,
    NoMatches(Query),
    Matches(Query, Vec<&'a Document>),
}

impl SearchOutcome<'_> {
    pub fn documents(&self) -> &[&Document] {
        match self {
            SearchOutcome::Matches(_, docs) => docs,
            _ => &[],
        }
    }
}

/// Scores every document, drops zero scores and orders by descending score.
/// Equal scores keep catalog order.
pub fn search<'a>(catalog: &'a Catalog, raw_query: &str) -> SearchOutcome<'a> {
    let query = Query::parse(raw_query);
    if query.is_blank() {
        return SearchOutcome::Blank;
    }

    let mut scored: Vec<ScoredDocument> = catalog
        .documents
        .iter()
        .map(|document| ScoredDocument {
            document,
            score: score(document, &query),
        })
        .filter(|s| s.score > 0)
        .collect();

    // `sort_by` is stable, which is what keeps ties in catalog order.
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    if scored.is_empty() {
        SearchOutcome::NoMatches(query)
    } else {
        SearchOutcome::Matches(query, scored.into_iter().map(|s| s.document).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(url: &str, title: &str, blurb: &str, tags: &[&str]) -> Document {
        Document {
            url: url.to_string(),
            title: title.to_string(),
            blurb: blurb.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("Dog-Walking, in Leeds!"), vec!["dog", "walking", "in", "leeds"]);
        assert_eq!(tokenize("cats 2+ visits"), vec!["cats", "2+", "visits"]);
        assert!(tokenize("   ?!  ").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_title_only_match_scores_six_plus_phrase_bonus() {
        let d = doc("/a", "Hamster care", "", &[]);
        // Single token: phrase == token, so the bonus applies too.
        assert_eq!(score(&d, &Query::parse("hamster")), 6 + 4);
        // Two tokens both in the title but not as a phrase
        assert_eq!(score(&d, &Query::parse("care hamster")), 6 + 6);
    }

    #[test]
    fn test_title_only_match_without_phrase() {
        let d = doc("/a", "Hamster care", "", &[]);
        // "rabbit" matches nothing, so the joined phrase is not in the title
        assert_eq!(score(&d, &Query::parse("hamster rabbit")), 6);
    }

    #[test]
    fn test_field_weights() {
        let d = doc(
            "/services/pet-taxi",
            "Pet taxi",
            "Vet runs and groomer drop-offs",
            &["transport", "vet trips"],
        );
        assert_eq!(score(&d, &Query::parse("vet")), 3 + 2);
        assert_eq!(score(&d, &Query::parse("services")), 1);
        assert_eq!(score(&d, &Query::parse("transport")), 3);
    }

    #[test]
    fn test_blank_and_no_match_are_distinct() {
        let catalog = Catalog::new(vec![doc("/a", "Dog walking", "", &[])]).unwrap();
        assert_eq!(search(&catalog, "  ,, "), SearchOutcome::Blank);
        assert!(matches!(search(&catalog, "zebra"), SearchOutcome::NoMatches(_)));
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let catalog = Catalog::new(vec![
            doc("/first", "Cat visits", "", &[]),
            doc("/second", "Boarding", "", &["cat"]),
            doc("/third", "Cat sitting", "", &[]),
            doc("/fourth", "Boarding again", "", &["cat"]),
        ])
        .unwrap();

        let outcome = search(&catalog, "cat");
        let urls: Vec<&str> = outcome.documents().iter().map(|d| d.url.as_str()).collect();
        assert_eq!(urls, vec!["/first", "/third", "/second", "/fourth"]);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(matches!(search(&catalog, "dog"), SearchOutcome::NoMatches(_)));
    }
}
