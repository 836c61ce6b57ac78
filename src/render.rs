//! HTML rendering of the dashboard page.
//!
//! Rendering is a pure function of [`DashboardView`]; the same view always
//! produces byte-identical markup.

use crate::dashboard::{ChainSelection, DashboardView};
use crate::models::{OptionsTable, Quote};
use std::fmt::Write;


/// Page title.
pub const PAGE_TITLE: &str = "📈 Options Chain Viewer (Paper Trading Tool)";

/// Warning shown when a symbol lists no expirations.
pub const NO_OPTIONS_WARNING: &str = "No options data available for this symbol.";

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0 2rem 3rem; color: #262730; }
h1 { margin-top: 1.5rem; }
form { margin: 0.5rem 0 1rem; }
label { display: block; font-size: 0.9rem; margin-bottom: 0.25rem; }
input[type=text], select { font-size: 1rem; padding: 0.4rem 0.6rem; min-width: 16rem; }
.warning { background: #fffce7; border: 1px solid #f5d27a; padding: 0.75rem 1rem; border-radius: 0.4rem; }
.error { background: #ffecec; border: 1px solid #f5a3a3; padding: 0.75rem 1rem; border-radius: 0.4rem; }
table { border-collapse: collapse; width: 100%; font-variant-numeric: tabular-nums; }
th, td { border: 1px solid #e6e9ef; padding: 0.3rem 0.6rem; text-align: right; }
thead th { background: #f0f2f6; }
tbody th { background: #fafbfc; }
"#;

/// Escapes text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders the complete dashboard page.
#[must_use]
pub fn render_page(view: &DashboardView) -> String {
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(PAGE_TITLE));
    let _ = writeln!(html, "<style>{}</style>\n</head>\n<body>", STYLE);
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(PAGE_TITLE));

    render_symbol_form(&mut html, view.symbol());

    match view {
        DashboardView::Idle => {}
        DashboardView::Failed { message, .. } => {
            let _ = writeln!(
                html,
                "<div class=\"error\" role=\"alert\">Error fetching data: {}</div>",
                escape_html(message)
            );
        }
        DashboardView::NoOptions { quote } => {
            render_header(&mut html, quote);
            let _ = writeln!(
                html,
                "<div class=\"warning\" role=\"status\">{}</div>",
                NO_OPTIONS_WARNING
            );
        }
        DashboardView::Chain {
            quote,
            expirations,
            selection,
        } => {
            render_header(&mut html, quote);
            render_expiration_form(&mut html, &quote.symbol, expirations, &selection.expiration);
            render_tables(&mut html, selection);
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_symbol_form(html: &mut String, symbol: &str) {
    html.push_str("<form method=\"get\" action=\"/\">\n");
    html.push_str("<label for=\"symbol\">Enter a stock or ETF symbol:</label>\n");
    let _ = writeln!(
        html,
        "<input type=\"text\" id=\"symbol\" name=\"symbol\" value=\"{}\" autocomplete=\"off\">",
        escape_html(symbol)
    );
    html.push_str("</form>\n");
}

/// Company header, price line and the expiration subheader.
fn render_header(html: &mut String, quote: &Quote) {
    let _ = writeln!(html, "<h3>🏢 {}</h3>", escape_html(&quote.title()));
    let _ = writeln!(
        html,
        "<p class=\"price\"><strong>{}</strong></p>",
        escape_html(&quote.price_label())
    );
    html.push_str("<h2>Select Expiration Date</h2>\n");
}

fn render_expiration_form(html: &mut String, symbol: &str, expirations: &[String], selected: &str) {
    html.push_str("<form method=\"get\" action=\"/\">\n");
    let _ = writeln!(
        html,
        "<input type=\"hidden\" name=\"symbol\" value=\"{}\">",
        escape_html(symbol)
    );
    html.push_str("<label for=\"expiration\">Choose Expiration Date</label>\n");
    html.push_str(
        "<select id=\"expiration\" name=\"expiration\" onchange=\"this.form.submit()\">\n",
    );
    for expiration in expirations {
        let value = escape_html(expiration);
        let marker = if expiration == selected { " selected" } else { "" };
        let _ = writeln!(html, "<option value=\"{}\"{}>{}</option>", value, marker, value);
    }
    html.push_str("</select>\n<noscript><button type=\"submit\">Show</button></noscript>\n</form>\n");
}

fn render_tables(html: &mut String, selection: &ChainSelection) {
    html.push_str("<h2>📞 Call Options</h2>\n");
    render_table(html, "calls", &selection.calls);
    html.push_str("<h2>📉 Put Options</h2>\n");
    render_table(html, "puts", &selection.puts);
}

fn render_table(html: &mut String, id: &str, table: &OptionsTable) {
    let _ = writeln!(html, "<table id=\"{}\">", id);
    html.push_str("<thead><tr>");
    for column in &table.columns {
        let _ = write!(html, "<th scope=\"col\">{}</th>", escape_html(column));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in &table.rows {
        let _ = write!(html, "<tr><th scope=\"row\">{}</th>", row.key());
        for cell in row.cells() {
            let _ = write!(html, "<td>{}</td>", cell);
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
}
