use crate::prelude::*;
use crate::query::Query;
use console::Term;
use itertools::Itertools;

pub const SEPARATOR: &str = "---";

/// Title echoing what is being watched, e.g. `[lifewatch] query 'nginx', cmd-exclude 'tail'`
pub fn title_line(query: &Query, excluded_names: &[String]) -> String {
    let mut title = format!("[lifewatch] query {}", quoted(query.as_str()));
    if !excluded_names.is_empty() {
        title.push_str(", cmd-exclude ");
        title.push_str(&excluded_names.iter().map(|name| quoted(name)).join(","));
    }
    title
}

/// Quote like Python's `repr`: single quotes, unless the text holds one and no double quote
fn quoted(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        if c == '\\' || c == quote {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(quote);
    out
}

/// Assemble a full frame: title, separator, then one line per row
pub fn compose_frame(title: &str, lines: &[String]) -> String {
    std::iter::once(title)
        .chain(std::iter::once(SEPARATOR))
        .chain(lines.iter().map(String::as_str))
        .join("\n")
}

/// Clear the terminal and draw `frame` from the top-left corner
pub fn repaint(term: &Term, frame: &str) -> Result<()> {
    term.clear_screen()
        .context("Failed to clear the terminal")?;
    term.write_line(frame)
        .context("Failed to write to the terminal")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_without_exclusions() {
        let query = Query::new("nginx").unwrap();
        assert_eq!(title_line(&query, &[]), "[lifewatch] query 'nginx'");
    }

    #[test]
    fn test_title_lists_exclusions() {
        let query = Query::new(r"worker-\d+").unwrap();
        let excluded = vec!["tail".to_string(), "it's".to_string()];
        assert_eq!(
            title_line(&query, &excluded),
            r#"[lifewatch] query 'worker-\\d+', cmd-exclude 'tail',"it's""#
        );
    }

    #[test]
    fn test_quoting_follows_python_repr() {
        assert_eq!(quoted("nginx"), "'nginx'");
        assert_eq!(quoted("it's"), r#""it's""#);
        assert_eq!(quoted(r#"say "hi""#), r#"'say "hi"'"#);
        assert_eq!(quoted(r#"it's "x""#), r#"'it\'s "x"'"#);
        assert_eq!(quoted(r"a\b"), r"'a\\b'");
    }

    #[test]
    fn test_frame_layout() {
        let lines = vec![" pid 1, a".to_string(), "+pid 2, b".to_string()];
        insta::assert_snapshot!(compose_frame("[lifewatch] query 'x'", &lines), @r"
        [lifewatch] query 'x'
        ---
         pid 1, a
        +pid 2, b
        ");
    }

    #[test]
    fn test_empty_frame_still_has_header() {
        assert_eq!(compose_frame("title", &[]), "title\n---");
    }
}
