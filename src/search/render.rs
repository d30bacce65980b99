//! Rendering of search outcomes for the terminal, HTML and JSON

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

use super::{Highlighter, Segment, SearchOutcome, score};

pub const BLANK_MESSAGE: &str = "Type something to search services and articles.";

fn no_match_message(raw_query: &str) -> String {
    format!(
        "No results for \"{}\". Try \"dog walking\", \"cat sitting\" or \"boarding\".",
        raw_query.trim()
    )
}

fn plain_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| {
            if s.highlighted {
                format!("**{}**", s.text)
            } else {
                s.text.to_string()
            }
        })
        .collect()
}

/// Terminal rendering; highlighted spans are wrapped in `**`.
pub fn render_plain(outcome: &SearchOutcome, raw_query: &str) -> String {
    match outcome {
        SearchOutcome::Blank => format!("{}\n", BLANK_MESSAGE),
        SearchOutcome::NoMatches(_) => format!("{}\n", no_match_message(raw_query)),
        SearchOutcome::Matches(query, docs) => {
            let highlighter = Highlighter::new(&query.tokens);
            let mut out = String::new();
            let _ = writeln!(out, "{} result(s) for \"{}\"", docs.len(), raw_query.trim());
            let _ = writeln!(out);
            for (i, doc) in docs.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{}. {}  ({})",
                    i + 1,
                    plain_segments(&highlighter.highlight(&doc.title)),
                    doc.url
                );
                let _ = writeln!(out, "   {}", plain_segments(&highlighter.highlight(&doc.blurb)));
            }
            out
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn html_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| {
            if s.highlighted {
                format!("<mark>{}</mark>", escape_html(s.text))
            } else {
                escape_html(s.text)
            }
        })
        .collect()
}

/// HTML fragment for the search page.
pub fn render_html(outcome: &SearchOutcome, raw_query: &str) -> String {
    match outcome {
        SearchOutcome::Blank => {
            format!("<p class=\"search-empty\">{}</p>\n", escape_html(BLANK_MESSAGE))
        }
        SearchOutcome::NoMatches(_) => format!(
            "<p class=\"search-no-results\">{}</p>\n",
            escape_html(&no_match_message(raw_query))
        ),
        SearchOutcome::Matches(query, docs) => {
            let highlighter = Highlighter::new(&query.tokens);
            let mut out = String::from("<ol class=\"search-results\">\n");
            for doc in docs {
                let _ = writeln!(
                    out,
                    "  <li><a href=\"{}\">{}</a><p>{}</p></li>",
                    escape_html(&doc.url),
                    html_segments(&highlighter.highlight(&doc.title)),
                    html_segments(&highlighter.highlight(&doc.blurb))
                );
            }
            out.push_str("</ol>\n");
            out
        }
    }
}

#[derive(Serialize)]
struct JsonResult<'a> {
    url: &'a str,
    title: &'a str,
    score: u32,
}

#[derive(Serialize)]
struct JsonResponse<'a> {
    query: &'a str,
    state: &'static str,
    results: Vec<JsonResult<'a>>,
}

/// Machine-readable rendering: `{ query, state, results: [{ url, title, score }] }`.
pub fn render_json(outcome: &SearchOutcome, raw_query: &str) -> Result<String> {
    let (state, results) = match outcome {
        SearchOutcome::Blank => ("blank", Vec::new()),
        SearchOutcome::NoMatches(_) => ("no_matches", Vec::new()),
        SearchOutcome::Matches(query, docs) => (
            "matches",
            docs.iter()
                .map(|doc| JsonResult {
                    url: &doc.url,
                    title: &doc.title,
                    score: score(doc, query),
                })
                .collect(),
        ),
    };
    let response = JsonResponse {
        query: raw_query,
        state,
        results,
    };
    Ok(serde_json::to_string_pretty(&response)?)
}
