//! HTML presenter, for runs started by a web server gateway.

use std::io::Write;

use super::ReportFormatter;
use crate::check::{Evaluation, Severity};

/// Response header emitted before the page when answering a gateway.
pub const CGI_HEADER: &str = "Content-Type: text/html; charset=utf-8\r\n\r\n";

const STYLE: &str = "\
body { background-color: #ececec; color: #000; font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif; font-size: 13px; line-height: 1.3em; padding: 30px; width: 700px; }
h1 { font-size: 1.5em; }
h2 { font-size: 1.1em; margin-top: 0; }
p { padding: 0; }
div { padding: 10px 20px; border: 1px solid; margin-bottom: 10px; }
";

/// Formats results as `<div class="{severity}">` blocks.
#[derive(Debug, Clone, Default)]
pub struct HtmlFormatter {
    page: Option<String>,
    cgi_header: bool,
}

impl HtmlFormatter {
    /// Bare blocks, for embedding in another page.
    pub fn fragment() -> Self {
        Self::default()
    }

    /// A complete document titled after the application.
    pub fn page(application: &str) -> Self {
        Self {
            page: Some(application.to_string()),
            cgi_header: false,
        }
    }

    /// Prefix the output with a CGI content-type header.
    pub fn with_cgi_header(mut self) -> Self {
        self.cgi_header = true;
        self
    }

    fn write_blocks<W: Write>(
        &self,
        evaluations: &[Evaluation],
        writer: &mut W,
    ) -> std::io::Result<()> {
        for evaluation in evaluations {
            let status = &evaluation.status;
            writeln!(
                writer,
                "<div class=\"{}\"><h2>{}</h2><p>{}</p></div>",
                status.severity().as_str(),
                escape(status.title()),
                escape(status.message())
            )?;
        }
        Ok(())
    }
}

/// Border and background color for a severity block.
fn palette(severity: Severity) -> (&'static str, &'static str) {
    match severity {
        Severity::Ok => ("#58B549", "#CDEACA"),
        Severity::Notice => ("#C2CBCF", "#F6F7FA"),
        Severity::Info => ("#8AAFC4", "#DDEEF9"),
        Severity::Warning => ("#C4B70D", "#FBFFB3"),
        Severity::Error => ("#DC4C42", "#FBB19B"),
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
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

impl ReportFormatter for HtmlFormatter {
    fn format<W: Write>(
        &self,
        evaluations: &[Evaluation],
        writer: &mut W,
    ) -> std::io::Result<()> {
        if self.cgi_header {
            write!(writer, "{}", CGI_HEADER)?;
        }

        let Some(application) = &self.page else {
            return self.write_blocks(evaluations, writer);
        };

        let title = escape(application);
        writeln!(writer, "<!DOCTYPE html>")?;
        writeln!(writer, "<html lang=\"en\">")?;
        writeln!(writer, "<head>")?;
        writeln!(writer, "<meta charset=\"utf-8\">")?;
        writeln!(writer, "<meta name=\"robots\" content=\"noindex, nofollow\">")?;
        writeln!(writer, "<title>{} host check</title>", title)?;
        writeln!(writer, "<style>")?;
        write!(writer, "{}", STYLE)?;
        for severity in Severity::ALL {
            let (border, background) = palette(severity);
            writeln!(
                writer,
                ".{} {{ border-color: {}; background-color: {}; }}",
                severity.as_str(),
                border,
                background
            )?;
        }
        writeln!(writer, "</style>")?;
        writeln!(writer, "</head>")?;
        writeln!(writer, "<body>")?;
        writeln!(writer, "<h1>{} host check</h1>", title)?;
        writeln!(
            writer,
            "<p>Checks this server for the ability to run {}. Remove this \
             report from public locations once you are done.</p>",
            title
        )?;
        self.write_blocks(evaluations, writer)?;
        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{RuleId, Status};

    fn evaluations() -> Vec<Evaluation> {
        vec![
            Evaluation {
                rule: RuleId::new("memory-limit"),
                status: Status::ok("Memory limit 64MB or more"),
            },
            Evaluation {
                rule: RuleId::new("doc-root"),
                status: Status::notice("doc_root is set")
                    .with_message("doc_root=<b>/srv & co</b>"),
            },
        ]
    }

    fn render(formatter: &HtmlFormatter) -> String {
        let mut output = Vec::new();
        formatter.format(&evaluations(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn fragment_blocks() {
        insta::assert_snapshot!(render(&HtmlFormatter::fragment()), @r#"
        <div class="ok"><h2>Memory limit 64MB or more</h2><p></p></div>
        <div class="notice"><h2>doc_root is set</h2><p>doc_root=&lt;b&gt;/srv &amp; co&lt;/b&gt;</p></div>
        "#);
    }

    #[test]
    fn page_has_one_style_per_severity() {
        let output = render(&HtmlFormatter::page("TYPO3 CMS"));
        assert!(output.starts_with("<!DOCTYPE html>"));
        assert!(output.contains("<title>TYPO3 CMS host check</title>"));
        for severity in Severity::ALL {
            assert!(output.contains(&format!(".{} {{", severity.as_str())));
        }
        assert!(output.trim_end().ends_with("</html>"));
    }

    #[test]
    fn cgi_header_comes_first() {
        let output = render(&HtmlFormatter::page("TYPO3 CMS").with_cgi_header());
        assert!(output.starts_with(CGI_HEADER));
        assert!(output[CGI_HEADER.len()..].starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }
}
