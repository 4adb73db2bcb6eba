pub mod config;
pub mod process;
pub mod root;

/// Visual style of the status line under a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusStyle {
    Success,
    Danger,
}

impl StatusStyle {
    fn color(self) -> &'static str {
        match self {
            StatusStyle::Success => "#28a745",
            StatusStyle::Danger => "#dc3545",
        }
    }
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
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

pub fn status_html(status: Option<(&str, StatusStyle)>) -> String {
    match status {
        Some((message, style)) => format!(
            r#"<p id="status" style="color: {}">{}</p>"#,
            style.color(),
            escape_html(message).replace('\n', "<br>")
        ),
        None => r#"<p id="status"></p>"#.to_string(),
    }
}

pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html>
            <head>
                <title>{}</title>
            </head>
            <body style="font-family: Helvetica, sans-serif; text-align: center">
                {}
            </body>
        </html>
        "#,
        escape_html(title),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_replaces_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn status_html_keeps_line_breaks() {
        let html = status_html(Some(("File saved to \n /tmp/<x>.xlsx", StatusStyle::Success)));
        assert!(html.contains("File saved to <br> /tmp/&lt;x&gt;.xlsx"));
        assert!(html.contains("#28a745"));
    }
}
