/// A full-featured `/pipeline` JSON envelope exercising every optional
/// report section, shared between the formatter and HTTP client tests.
pub fn report_envelope_fixture() -> &'static str {
    return r#"
{
  "result": {
    "docs": [
      {
        "metadata": {
          "title": "State of Rust 2024",
          "summary": "Rust adoption keeps growing.",
          "author": "Research Desk",
          "date": "2024-05-01",
          "version": "1.2"
        }
      }
    ],
    "points": [
      "overview",
      "Adoption is up 20% year over year.",
      "- Tooling keeps improving."
    ],
    "report": {
      "introduction": "This report covers the Rust ecosystem.",
      "conclusion": "Rust is here to stay."
    },
    "analysis": [
      { "title": "Ecosystem", "content": "Crates.io keeps expanding." },
      { "content": "Async maturity improved." }
    ],
    "recommendations": [
      { "title": "Invest in training", "description": "Teams should budget onboarding time." },
      "Adopt incrementally."
    ],
    "methodology": "Desk research over public indexes.",
    "text_sources": [
      "https://blog.rust-lang.org",
      "https://crates.io"
    ]
  }
}
"#
    .trim();
}
