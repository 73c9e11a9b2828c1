use colored::Colorize;
use serde::Serialize;

use crate::views::{ImpactRow, JournalCard, JournalDetails, RecommendationCard, SearchHit};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// Everything a command can display.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "view", content = "items", rename_all = "snake_case")]
pub enum Report {
    Cards(Vec<JournalCard>),
    Search(Vec<SearchHit>),
    List(Vec<ImpactRow>),
    Details(Box<JournalDetails>),
    Recommendations(Vec<RecommendationCard>),
}

impl Report {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Cards(v) => v.is_empty(),
            Self::Search(v) => v.is_empty(),
            Self::List(v) => v.is_empty(),
            Self::Details(_) => false,
            Self::Recommendations(v) => v.is_empty(),
        }
    }

    fn empty_message(&self) -> &'static str {
        match self {
            Self::Search(_) => "No matching journals found",
            Self::Recommendations(_) => "No matches found.",
            _ => "No journals to show",
        }
    }
}

pub fn render(report: &Report, format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Json => render_json(report),
    }
}

pub fn render_json(report: &Report) -> Vec<u8> {
    serde_json::to_vec_pretty(report).unwrap_or_else(|_| b"{}\n".to_vec())
}

/// Plain text, no colors. Terminal output goes through [`print_report`].
pub fn render_text(report: &Report) -> Vec<u8> {
    let mut out = String::new();
    for line in text_lines(report, false) {
        out.push_str(&line);
        out.push('\n');
    }
    out.into_bytes()
}

pub fn print_report(report: &Report) {
    for line in text_lines(report, true) {
        println!("{line}");
    }
}

fn heading(text: &str, styled: bool) -> String {
    if styled {
        text.bold().white().to_string()
    } else {
        text.to_string()
    }
}

fn dim(text: &str, styled: bool) -> String {
    if styled {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

fn text_lines(report: &Report, styled: bool) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    if report.is_empty() {
        lines.push(report.empty_message().to_string());
        return lines;
    }
    match report {
        Report::Cards(cards) => {
            for c in cards {
                lines.push(heading(&c.title, styled));
                lines.push(format!(
                    "   {}: {}  |  {}: {}",
                    c.issn.label, c.issn.value, c.field.label, c.field.value
                ));
                lines.push(format!(
                    "   {}: {}  |  {}: {}  |  {}: {}",
                    c.headline.label,
                    c.headline.value,
                    c.h_index.label,
                    c.h_index.value,
                    c.coverage.label,
                    c.coverage.value
                ));
                lines.push(dim(&format!("   {}", c.href), styled));
            }
        }
        Report::Search(hits) => {
            for h in hits {
                lines.push(heading(&h.name, styled));
                lines.push(format!("   SJR: {}  |  {}", h.sjr, h.categories));
                lines.push(dim(&format!("   {}", h.href), styled));
            }
        }
        Report::List(rows) => {
            for r in rows {
                lines.push(format!(
                    "{:>4}  {}",
                    r.position,
                    heading(&r.name, styled)
                ));
                lines.push(format!("      {}  |  {}", r.publisher, r.categories));
                lines.push(format!(
                    "      IF*: {}  |  Citations: {}",
                    r.impact_factor, r.citations
                ));
            }
        }
        Report::Details(d) => {
            lines.push(heading(&d.title, styled));
            if let Some(favicon) = d.favicon.as_deref() {
                lines.push(dim(&format!("   icon: {favicon}"), styled));
            }
            lines.push(format!("   ISSN: {}", d.issn));
            lines.push(format!("   Publisher: {}", d.publisher));
            lines.push(String::new());
            lines.push(heading("Metrics", styled));
            lines.push(format!("   SJR: {}", d.sjr));
            lines.push(format!("   Cited By Count: {}", d.cited_by_count));
            lines.push(format!("   H index: {}", d.h_index));
            lines.push(format!("   Best Quartile: {}", d.best_quartile));
            lines.push(String::new());
            lines.push(heading("Publication", styled));
            for item in &d.publication {
                lines.push(format!("   {}: {}", item.label, item.value));
            }
            lines.push(String::new());
            lines.push(heading("SCImago Categories", styled));
            lines.push(format!("   {}", d.categories));
            lines.push(heading("Disciplines", styled));
            lines.push(format!("   {}", d.disciplines));
            lines.push(String::new());
            lines.push(heading("Additional Information", styled));
            for item in &d.additional {
                lines.push(format!("   {}: {}", item.label, item.value));
            }
        }
        Report::Recommendations(cards) => {
            for c in cards {
                match c.score.as_deref() {
                    Some(score) => lines.push(format!("{} ({score})", heading(&c.name, styled))),
                    None => lines.push(heading(&c.name, styled)),
                }
                lines.push(format!("   Publisher: {}", c.publisher));
                lines.push(format!("   Discipline: {}", c.discipline));
                lines.push(format!("   SJR Rank: {}", c.sjr));
                lines.push(dim(&format!("   {}", c.homepage), styled));
            }
        }
    }
    lines
}
