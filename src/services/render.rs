//! Company table rendering service
//!
//! Reads a table document from the render directory and turns it into an
//! HTML page. File names are validated before any file system access.

use crate::error::RenderError;
use crate::state::Company;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tokio::fs;

/// Column headers used when the document does not supply any
pub const DEFAULT_HEADERS: [&str; 6] = [
    "Parent Company",
    "Subsidiary Portfolio / Services",
    "HQ / Info",
    "Annual Revenue ($ million)",
    "HomePage",
    "Logo",
];

const PAGE_STYLE: &str = r#"
        body {
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 20px;
        }
        h1 {
            color: #333;
            margin-bottom: 20px;
        }
        table {
            border-collapse: collapse;
            width: 100%;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 10px;
            text-align: left;
            vertical-align: top;
        }
        th {
            background-color: #f3f4f6;
            font-weight: bold;
        }
        img {
            object-fit: contain;
        }
        a {
            color: #0066cc;
            text-decoration: none;
        }
        a:hover {
            text-decoration: underline;
        }
"#;

/// On-disk shape: `{"Mainline": {"Table": {"Header": {"Data": [..]}, "Row": [..]}}}`
#[derive(Debug, Default, Deserialize)]
struct TableDocument {
    #[serde(rename = "Mainline", default)]
    mainline: Mainline,
}

#[derive(Debug, Default, Deserialize)]
struct Mainline {
    #[serde(rename = "Table", default)]
    table: TableSection,
}

#[derive(Debug, Default, Deserialize)]
struct TableSection {
    #[serde(rename = "Header", default)]
    header: HeaderSection,
    #[serde(rename = "Row", default)]
    rows: Option<Vec<Company>>,
}

#[derive(Debug, Default, Deserialize)]
struct HeaderSection {
    #[serde(rename = "Data", default)]
    data: Vec<Value>,
}

/// Headers and rows of a company table
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyTable {
    /// Column headers
    pub headers: Vec<String>,
    /// One company per row
    pub rows: Vec<Company>,
}

impl CompanyTable {
    /// Parse a table document, falling back to the default headers
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        let document: TableDocument =
            serde_json::from_str(json).map_err(RenderError::InvalidJson)?;
        let table = document.mainline.table;

        let headers = if table.header.data.is_empty() {
            DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect()
        } else {
            table
                .header
                .data
                .iter()
                .map(|value| match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        };

        Ok(Self {
            headers,
            rows: table.rows.unwrap_or_default(),
        })
    }
}

/// Table rendering service
pub struct RenderService;

impl RenderService {
    /// Reject file names that could leave the render directory
    ///
    /// # Returns
    /// * `Ok(())` - Name ends in `.json` and has no separators or `..`
    /// * `Err(RenderError::InvalidFilename)` - Otherwise
    pub fn validate_filename(name: &str) -> Result<(), RenderError> {
        if !name.ends_with(".json")
            || name.contains('/')
            || name.contains('\\')
            || name.contains("..")
        {
            return Err(RenderError::InvalidFilename);
        }
        Ok(())
    }

    /// Validate `name` and read the table document it names under `root`
    pub async fn load_table(root: &Path, name: &str) -> Result<CompanyTable, RenderError> {
        Self::validate_filename(name)?;

        let path = root.join(name);
        let json = fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RenderError::FileNotFound(name.to_string())
            } else {
                RenderError::Io(e.to_string())
            }
        })?;

        tracing::debug!(path = %path.display(), "Loaded table document");
        CompanyTable::from_json(&json)
    }

    /// Render the `<table>` element for the given headers and rows
    pub fn render_table(headers: &[String], rows: &[Company]) -> String {
        let mut thead = String::from("<thead><tr>");
        for header in headers {
            thead.push_str(&format!("<th>{}</th>", escape_html(header)));
        }
        thead.push_str("</tr></thead>");

        let mut tbody = String::from("<tbody>");
        for company in rows {
            tbody.push_str(&Self::render_row(company));
        }
        tbody.push_str("</tbody>");

        format!(
            r#"<table border="1" style="border-collapse: collapse; width: 100%;">{thead}{tbody}</table>"#
        )
    }

    fn render_row(company: &Company) -> String {
        let name = escape_html(&company.text("Company"));
        let services = escape_html(&company.text("Services"));
        let hubs = company
            .hubs()
            .iter()
            .map(|hub| escape_html(hub))
            .collect::<Vec<_>>()
            .join("<br>");
        let revenue = escape_html(&company.text("Revenue"));

        let homepage = company.text("HomePage");
        let homepage_cell = if homepage.is_empty() {
            String::new()
        } else {
            format!(
                r#"<a href="{}" target="_blank" rel="noopener">HomePage</a>"#,
                escape_html(&homepage)
            )
        };

        let logo = company.text("Logo");
        let logo_cell = if logo.is_empty() {
            String::new()
        } else {
            format!(
                r#"<img src="{}" alt="{name} Logo" width="50" height="50" />"#,
                escape_html(&logo)
            )
        };

        format!(
            "<tr>\n            <td>{name}</td>\n            <td>{services}</td>\n            <td>{hubs}</td>\n            <td>{revenue}</td>\n            <td>{homepage_cell}</td>\n            <td>{logo_cell}</td>\n        </tr>"
        )
    }

    /// Render the full HTML document for a table
    pub fn render_page(table: &CompanyTable) -> String {
        let table_html = Self::render_table(&table.headers, &table.rows);
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Trucking Companies</title>
    <style>{PAGE_STYLE}    </style>
</head>
<body>
    <h1>Trucking Companies Information</h1>
    {table_html}
</body>
</html>"#
        )
    }

    /// Minimal page carrying a single heading
    pub fn message_page(message: &str) -> String {
        format!("<html><body><h1>{}</h1></body></html>", message)
    }
}

/// Escape `& < > " '` for inclusion in HTML text and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
