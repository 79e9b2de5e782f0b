use super::{DisplayRow, Status};
use crate::query::Query;
use console::Style;

const ELLIPSIS: &str = "...";

/// Arguments at these positions are always shown, the rest only when they match the query
const ALWAYS_SHOWN_ARGS: usize = 2;

/// Formats display rows as single terminal lines, emphasizing whatever the query matched
pub struct Presenter<'q> {
    query: &'q Query,
    colors: bool,
}

impl<'q> Presenter<'q> {
    pub fn new(query: &'q Query, colors: bool) -> Self {
        Self { query, colors }
    }

    pub fn format_row(&self, row: &DisplayRow) -> String {
        let base = base_style(row.status);
        let descriptor = row.descriptor;

        // Every piece is painted on its own since an emphasized match resets the style after it
        let mut line = self.paint(&base, &format!("{}pid {}, name ", marker(row.status), row.pid));
        line.push_str(&self.emphasize(&descriptor.name, &base));
        line.push_str(&self.paint(&base, ", cmdline "));
        line.push_str(&self.format_command_line(&descriptor.command_line, &base));
        line.push_str(&self.paint(&base, ", cwd "));
        line.push_str(&self.emphasize(&descriptor.working_directory, &base));
        line
    }

    /// Join the arguments, collapsing every run of uninteresting ones into a single ellipsis
    fn format_command_line(&self, args: &[String], base: &Style) -> String {
        let mut shown: Vec<String> = Vec::with_capacity(args.len());
        let mut eliding = false;
        for (position, arg) in args.iter().enumerate() {
            if position < ALWAYS_SHOWN_ARGS || self.query.is_match(arg) {
                if eliding {
                    shown.push(self.paint(base, ELLIPSIS));
                    eliding = false;
                }
                shown.push(self.emphasize(arg, base));
            } else {
                eliding = true;
            }
        }
        if eliding {
            shown.push(self.paint(base, ELLIPSIS));
        }
        shown.join(" ")
    }

    /// Render every match of the query in bold, keeping `base` around it
    fn emphasize(&self, text: &str, base: &Style) -> String {
        let bold = base.clone().bold();
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for found in self.query.pattern().find_iter(text) {
            if found.is_empty() {
                continue;
            }
            out.push_str(&self.paint(base, &text[cursor..found.start()]));
            out.push_str(&self.paint(&bold, found.as_str()));
            cursor = found.end();
        }
        out.push_str(&self.paint(base, &text[cursor..]));
        out
    }

    fn paint(&self, style: &Style, text: &str) -> String {
        if !self.colors || text.is_empty() {
            return text.to_string();
        }
        style.clone().force_styling(true).apply_to(text).to_string()
    }
}

fn marker(status: Status) -> char {
    match status {
        Status::New => '+',
        Status::Dead => '-',
        Status::Steady => ' ',
    }
}

fn base_style(status: Status) -> Style {
    match status {
        Status::New => Style::new().blue(),
        Status::Dead => Style::new().red(),
        Status::Steady => Style::new(),
    }
}
