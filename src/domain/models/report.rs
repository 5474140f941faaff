#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
use serde_derive::Deserialize;
use serde_derive::Serialize;

pub const NO_RESULTS_TEXT: &str = "I couldn't find any relevant information.";

const DEFAULT_TITLE: &str = "Generated Report";

/// Body of a JSON `/pipeline` response. `pdf_path` shows up when the
/// backend ran in verbose mode and wrote the report to disk as well.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEnvelope {
    #[serde(default)]
    pub result: Option<ReportPayload>,
    #[serde(default)]
    pub pdf_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportPayload {
    #[serde(default)]
    pub docs: Vec<Doc>,
    #[serde(default)]
    pub points: Vec<String>,
    #[serde(default)]
    pub report: Option<ReportSections>,
    #[serde(default)]
    pub analysis: Option<AnalysisSection>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub methodology: Option<String>,
    #[serde(default)]
    pub text_sources: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Doc {
    #[serde(default)]
    pub metadata: DocMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSections {
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
}

/// The analysis field arrives either as prose or as a list of entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisSection {
    Structured(Vec<AnalysisEntry>),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisEntry {
    Item {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        content: Option<String>,
    },
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recommendation {
    Item {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
    Text(String),
}

fn clean_point(point: &str) -> String {
    let trimmed = point.trim();
    if let Some(rest) = trimmed.strip_prefix(['-', '•', '*']) {
        return rest.trim_start().to_string();
    }

    return trimmed.to_string();
}

/// Builds the plain-text report shown in the conversation. Sections are
/// concatenated in a fixed order and skipped entirely when their source
/// field is absent. The first key point is the backend's echo of the query
/// and is dropped from the bullet list.
pub fn format_report(payload: &ReportPayload) -> String {
    let Some(doc) = payload.docs.first() else {
        return NO_RESULTS_TEXT.to_string();
    };

    let title = doc
        .metadata
        .title
        .clone()
        .unwrap_or_else(|| return DEFAULT_TITLE.to_string());
    let mut out = format!("{title}\n\n");

    if let Some(summary) = &doc.metadata.summary {
        out += &format!("EXECUTIVE SUMMARY:\n\n{summary}\n\n---\n\n");
    }

    if !payload.points.is_empty() {
        out += "KEY POINTS:\n\n";
        for point in payload.points.iter().skip(1) {
            out += &format!("• {}\n\n", clean_point(point));
        }
        out += "---\n\n";
    }

    if let Some(report) = &payload.report {
        if let Some(introduction) = &report.introduction {
            out += &format!("INTRODUCTION:\n\n{introduction}\n\n");
        }
        if let Some(conclusion) = &report.conclusion {
            out += &format!("CONCLUSION:\n\n{conclusion}\n\n");
        }
    }

    if let Some(analysis) = &payload.analysis {
        out += "DETAILED ANALYSIS:\n\n";
        match analysis {
            AnalysisSection::Structured(entries) => {
                for (idx, entry) in entries.iter().enumerate() {
                    let n = idx + 1;
                    let (entry_title, content) = match entry {
                        AnalysisEntry::Item { title, content } => (
                            title
                                .clone()
                                .unwrap_or_else(|| return format!("Analysis Point {n}")),
                            content.clone().unwrap_or_default(),
                        ),
                        AnalysisEntry::Text(text) => {
                            (format!("Analysis Point {n}"), text.clone())
                        }
                    };

                    out += &format!("{n}. {entry_title}:\n\n{content}\n\n");
                }
            }
            AnalysisSection::Text(text) => {
                out += &format!("{text}\n\n");
            }
        }
    }

    if !payload.recommendations.is_empty() {
        out += "RECOMMENDATIONS:\n\n";
        for (idx, recommendation) in payload.recommendations.iter().enumerate() {
            let n = idx + 1;
            let (entry_title, description) = match recommendation {
                Recommendation::Item { title, description } => (
                    title
                        .clone()
                        .unwrap_or_else(|| return format!("Recommendation {n}")),
                    description.clone().unwrap_or_default(),
                ),
                Recommendation::Text(text) => (format!("Recommendation {n}"), text.clone()),
            };

            out += &format!("{n}. {entry_title}:\n   {description}\n\n");
        }
        out += "---\n\n";
    }

    if let Some(methodology) = &payload.methodology {
        out += &format!("METHODOLOGY:\n\n{methodology}\n\n");
    }

    if !payload.text_sources.is_empty() {
        out += "SOURCES & REFERENCES:\n\n";
        for (idx, source) in payload.text_sources.iter().enumerate() {
            out += &format!("{}. {source}\n", idx + 1);
        }
        out += "\n";
    }

    let metadata = &doc.metadata;
    if metadata.author.is_some() || metadata.date.is_some() || metadata.version.is_some() {
        out += "---\n\nDOCUMENT INFORMATION:\n\n";
        if let Some(author) = &metadata.author {
            out += &format!("Author: {author}\n");
        }
        if let Some(date) = &metadata.date {
            out += &format!("Date: {date}\n");
        }
        if let Some(version) = &metadata.version {
            out += &format!("Version: {version}\n");
        }
        out += "\n";
    }

    return out;
}
