//! Output formatting for extracted links

use eyre::Result;
use facet::Facet;
use specmonkey_core::Link;
use std::str::FromStr;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Txt,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Txt),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown output format '{}' (expected txt, csv or json)",
                other
            )),
        }
    }
}

/// Render links in the specified format
pub fn render_links(links: &[Link], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Txt => Ok(render_txt(links)),
        OutputFormat::Csv => Ok(render_csv(links)),
        OutputFormat::Json => render_json(links),
    }
}

fn render_txt(links: &[Link]) -> String {
    let mut output = String::new();
    for link in links {
        output.push_str(&format!(
            "{}:{}:{}\n",
            link.file_name, link.line_number, link.url
        ));
    }
    output
}

fn render_csv(links: &[Link]) -> String {
    let mut output = String::from("filename,line_number,url\n");
    for link in links {
        output.push_str(&format!(
            "{},{},{}\n",
            csv_field(&link.file_name),
            link.line_number,
            csv_field(&link.url)
        ));
    }
    output
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[derive(Facet)]
struct JsonLink {
    filename: String,
    line_number: usize,
    url: String,
}

fn render_json(links: &[Link]) -> Result<String> {
    let json_links: Vec<JsonLink> = links
        .iter()
        .map(|link| JsonLink {
            filename: link.file_name.clone(),
            line_number: link.line_number,
            url: link.url.clone(),
        })
        .collect();

    facet_json::to_string_pretty(&json_links)
        .map_err(|e| eyre::eyre!("JSON serialization failed: {:?}", e))
}
