//! Search-term highlighting for list views.

use regex::RegexBuilder;

/// Wrap every case-insensitive occurrence of `term` in `<mark>` tags.
///
/// The term is matched literally; regex metacharacters in user input are escaped.
/// Text outside and inside the marks is HTML-escaped, and the matched text keeps
/// its own casing.
pub fn highlight(text: &str, term: &str) -> String {
    if term.is_empty() || text.is_empty() {
        return escape_html(text);
    }

    let pattern = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(p) => p,
        Err(e) => {
            // Only reachable if the escaped term exceeds the regex size limit.
            tracing::warn!(error = %e, "could not build highlight pattern");
            return escape_html(text);
        }
    };

    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for m in pattern.find_iter(text) {
        out.push_str(&escape_html(&text[last..m.start()]));
        out.push_str("<mark>");
        out.push_str(&escape_html(m.as_str()));
        out.push_str("</mark>");
        last = m.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
