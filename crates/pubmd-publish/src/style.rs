//! Embedded stylesheet for publication pages.
//!
//! Screen output uses relative `em`/`px` sizing with a 900px column; PDF-ready
//! output switches to A4 page rules and point sizes.

use std::fmt::Write;

/// Size values that differ between screen and print output.
struct Scale {
    max_width: &'static str,
    padding: &'static str,
    base_font: &'static str,
    h1: &'static str,
    h1_margin_top: &'static str,
    h2: &'static str,
    h3: &'static str,
    h4: &'static str,
    h5: &'static str,
    code: &'static str,
    pre_code: &'static str,
    table: &'static str,
    footer: &'static str,
}

const SCREEN: Scale = Scale {
    max_width: "900px",
    padding: "20px",
    base_font: "16px",
    h1: "2.5em",
    h1_margin_top: "30px",
    h2: "2em",
    h3: "1.5em",
    h4: "1.25em",
    h5: "1.1em",
    code: "0.9em",
    pre_code: "0.85em",
    table: "0.95em",
    footer: "0.9em",
};

const PRINT: Scale = Scale {
    max_width: "210mm",
    padding: "10mm",
    base_font: "11pt",
    h1: "26pt",
    h1_margin_top: "40px",
    h2: "20pt",
    h3: "16pt",
    h4: "13pt",
    h5: "12pt",
    code: "9pt",
    pre_code: "9pt",
    table: "10pt",
    footer: "9pt",
};

/// Page rules only emitted for PDF-ready output.
const PRINT_RULES: &str = "\
@page {
    size: A4;
    margin: 2.5cm;
}

@media print {
    body {
        background: white;
        font-size: 11pt;
    }

    h1, h2, h3, h4, h5, h6 {
        page-break-after: avoid;
    }

    p, table, pre, blockquote {
        page-break-inside: avoid;
    }

    thead {
        display: table-header-group;
    }

    tr {
        page-break-inside: avoid;
    }
}
";

/// Build the stylesheet for screen or PDF-ready output.
pub(crate) fn stylesheet(pdf_ready: bool) -> String {
    let s = if pdf_ready { &PRINT } else { &SCREEN };
    let mut css = String::with_capacity(4096);

    if pdf_ready {
        css.push_str(PRINT_RULES);
        css.push('\n');
    }

    let _ = write!(
        css,
        "\
body {{
    font-family: 'Georgia', 'Times New Roman', serif;
    line-height: 1.7;
    color: #333;
    max-width: {max_width};
    margin: 0 auto;
    padding: {padding};
    background: white;
    font-size: {base_font};
}}

h1 {{
    font-size: {h1};
    color: #1a1a1a;
    margin-top: {h1_margin_top};
    margin-bottom: 25px;
    page-break-after: avoid;
    text-align: center;
    font-weight: 700;
}}

h2 {{
    font-size: {h2};
    color: #2a2a2a;
    margin-top: 35px;
    margin-bottom: 20px;
    border-bottom: 3px solid #0066cc;
    padding-bottom: 8px;
    page-break-after: avoid;
    font-weight: 600;
}}

h3 {{
    font-size: {h3};
    color: #3a3a3a;
    margin-top: 25px;
    margin-bottom: 15px;
    page-break-after: avoid;
    font-weight: 600;
}}

h4 {{
    font-size: {h4};
    color: #4a4a4a;
    margin-top: 20px;
    margin-bottom: 10px;
    page-break-after: avoid;
    font-weight: 600;
}}

h5, h6 {{
    font-size: {h5};
    color: #5a5a5a;
    margin-top: 15px;
    margin-bottom: 8px;
    page-break-after: avoid;
    font-weight: 600;
}}

p {{
    margin: 12px 0;
    text-align: justify;
    line-height: 1.7;
}}

code {{
    background-color: #f4f4f4;
    padding: 2px 8px;
    border-radius: 4px;
    font-family: 'Courier New', 'Consolas', monospace;
    font-size: {code};
    color: #c7254e;
    border: 1px solid #e1e1e8;
}}

pre {{
    background-color: #f8f8f8;
    border: 1px solid #ddd;
    border-left: 4px solid #0066cc;
    border-radius: 5px;
    padding: 15px 20px;
    overflow-x: auto;
    page-break-inside: avoid;
    margin: 20px 0;
}}

pre code {{
    background: none;
    padding: 0;
    border: none;
    color: #333;
    font-size: {pre_code};
}}

table {{
    width: 100%;
    border-collapse: collapse;
    margin: 25px 0;
    page-break-inside: avoid;
    font-size: {table};
}}

th, td {{
    border: 1px solid #ddd;
    padding: 12px 15px;
    text-align: left;
}}

th {{
    background-color: #0066cc;
    color: white;
    font-weight: bold;
    text-align: center;
}}

tr:nth-child(even) {{
    background-color: #f9f9f9;
}}

tr:hover {{
    background-color: #f5f5f5;
}}

ul, ol {{
    margin: 15px 0;
    padding-left: 40px;
}}

li {{
    margin: 8px 0;
    line-height: 1.6;
}}

hr {{
    border: none;
    border-top: 2px solid #ccc;
    margin: 40px 0;
}}

strong {{
    font-weight: bold;
    color: #1a1a1a;
}}

em {{
    font-style: italic;
}}

a {{
    color: #0066cc;
    text-decoration: none;
    border-bottom: 1px dotted #0066cc;
}}

a:hover {{
    color: #004499;
    border-bottom: 1px solid #004499;
}}

blockquote {{
    border-left: 4px solid #0066cc;
    margin: 20px 0;
    padding: 10px 20px;
    background-color: #f9f9f9;
    font-style: italic;
}}

.publication-footer {{
    margin-top: 50px;
    padding-top: 20px;
    border-top: 2px solid #ccc;
    text-align: center;
    font-size: {footer};
    color: #666;
}}
",
        max_width = s.max_width,
        padding = s.padding,
        base_font = s.base_font,
        h1 = s.h1,
        h1_margin_top = s.h1_margin_top,
        h2 = s.h2,
        h3 = s.h3,
        h4 = s.h4,
        h5 = s.h5,
        code = s.code,
        pre_code = s.pre_code,
        table = s.table,
        footer = s.footer,
    );
    css
}
