//! HTML for the dashboard page.

use bikeshare_common::format_iso_date;
use bikeshare_graphs::{ChartKind, DateRange, HOUR_CHART_CAPTION};
use std::fmt::Write;

/// Page header.
pub const PAGE_TITLE: &str = "Bike Rental Analysis";

/// Label of the date-range picker.
pub const PICKER_LABEL: &str = "Select Period";

const STYLE: &str = "body{font-family:sans-serif;max-width:1240px;margin:0 auto;padding:1rem}\
form{display:flex;gap:.75rem;align-items:end;margin-bottom:1.5rem}\
label{display:flex;flex-direction:column;font-size:.9rem}\
figure{margin:0 0 2rem}img{width:100%;height:auto}\
figcaption{color:#555;font-size:.9rem}.meta{color:#777;font-size:.8rem}";

/// Query string selecting `range`.
pub fn range_query(range: &DateRange) -> String {
    format!(
        "start={}&end={}",
        format_iso_date(range.start),
        format_iso_date(range.end)
    )
}

/// URL of one chart for `range`.
pub fn chart_url(kind: ChartKind, range: &DateRange) -> String {
    format!("/charts/{}.svg?{}", kind.slug(), range_query(range))
}

/// URL of one chart over whatever the server defaults to.
fn default_chart_url(kind: ChartKind) -> String {
    format!("/charts/{}.svg", kind.slug())
}

/// One picker input. `value` and the bounds are left out when the table has no data span.
fn date_input(out: &mut String, name: &str, label: &str, value: chrono::NaiveDate, span: Option<&DateRange>) {
    let attrs = span.map_or_else(String::new, |span| {
        format!(
            " value=\"{}\" min=\"{}\" max=\"{}\"",
            format_iso_date(value),
            format_iso_date(span.start),
            format_iso_date(span.end)
        )
    });
    let _ = write!(
        out,
        "<label>{label}<input type=\"date\" name=\"{name}\"{attrs}></label>"
    );
}

/// Renders the full page for `range`.
///
/// `span` bounds the picker; it is `None` only when the table is empty, in
/// which case `range` is not a real selection and is not shown.
pub fn render_page(range: &DateRange, span: Option<&DateRange>, observations: usize) -> String {
    let mut out = String::with_capacity(4096);
    let _ = write!(
        out,
        "<!DOCTYPE html><html lang=\"id\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\
         <title>{PAGE_TITLE}</title><style>{STYLE}</style></head><body>\
         <h1>{PAGE_TITLE}</h1>"
    );

    let _ = write!(out, "<form method=\"get\" action=\"/\"><fieldset><legend>{PICKER_LABEL}</legend>");
    date_input(&mut out, "start", "Start", range.start, span);
    date_input(&mut out, "end", "End", range.end, span);
    out.push_str("</fieldset><button type=\"submit\">Apply</button></form>");
    match span {
        Some(_) => {
            let _ = write!(out, "<p class=\"meta\">{observations} observations in {range}</p>");
        }
        None => out.push_str("<p class=\"meta\">No observations loaded</p>"),
    }

    for kind in ChartKind::ALL {
        let _ = write!(
            out,
            "<figure id=\"{}\"><h2>{}</h2><img src=\"{}\" alt=\"{}\">",
            kind.slug(),
            kind.title(),
            span.map_or_else(|| default_chart_url(kind), |_| chart_url(kind, range))
                .replace('&', "&amp;"),
            kind.title()
        );
        if kind == ChartKind::Hour {
            let _ = write!(out, "<figcaption>{HOUR_CHART_CAPTION}</figcaption>");
        }
        out.push_str("</figure>");
    }

    out.push_str("</body></html>");
    out
}
