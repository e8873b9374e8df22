use serde_json::Value;
use std::fmt::Write;

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Serialize JSON for inline use inside a `<script>` element.
pub fn script_json(value: &Value) -> String {
    // A literal "</" could close the script element early
    value.to_string().replace("</", "<\\/")
}

/// Page text and assets
pub struct PageSpec<'a> {
    pub title: &'a str,
    pub heading: &'a str,
    pub credits: &'a [String],
    pub plotly_cdn: &'a str,
}

const STYLE: &str = r#"
      body { font-family: "Open Sans", Arial, sans-serif; margin: 0 24px; color: #222; }
      h1, h4, p.credit { text-align: center; }
      hr { border: 1px solid #ccc; }
      .section { margin-bottom: 30px; }
      .row { display: flex; justify-content: space-between; margin-bottom: 30px; }
      .half { width: 48%; padding: 0 10px; }
      .chart { min-height: 450px; }
"#;

/// Chart element ids, in layout order
const MAP: &str = "map";
const BARS: &str = "bars";
const PIE: &str = "pie";
const LINE: &str = "line";
const HISTOGRAM: &str = "histogram";

fn chart(id: &str) -> String {
    format!(r#"<div id="{id}" class="chart"></div>"#)
}

/// Render the single dashboard page.
///
/// `figures` is an object keyed by `map`, `bars`, `pie`, `line` and
/// `histogram`; each value is a Plotly figure.
pub fn render(spec: &PageSpec<'_>, figures: &Value) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="es">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title}</title>
    <script src="{cdn}" charset="utf-8"></script>
    <style>{STYLE}    </style>
  </head>
  <body>
    <h1>{heading}</h1>
"#,
        title = escape_html(spec.title),
        cdn = escape_html(spec.plotly_cdn),
        heading = escape_html(spec.heading),
    );

    if !spec.credits.is_empty() {
        html.push_str("    <h4>Realizado por:</h4>\n");
        for name in spec.credits {
            let _ = writeln!(html, r#"    <p class="credit">{}</p>"#, escape_html(name));
        }
    }

    let _ = write!(
        html,
        r#"
    <div class="section">{map}</div>
    <hr />
    <div class="row">
      <div class="half">{bars}</div>
      <div class="half">{pie}</div>
    </div>
    <hr />
    <div class="row">
      <div class="half">{line}</div>
      <div class="half">{histogram}</div>
    </div>
    <hr />
    <script>
      const FIGURES = {figures};
      for (const [id, fig] of Object.entries(FIGURES)) {{
        const el = document.getElementById(id);
        if (el) Plotly.newPlot(el, fig.data, fig.layout, {{ responsive: true }});
      }}
    </script>
  </body>
</html>
"#,
        map = chart(MAP),
        bars = chart(BARS),
        pie = chart(PIE),
        line = chart(LINE),
        histogram = chart(HISTOGRAM),
        figures = script_json(figures),
    );
    html
}
