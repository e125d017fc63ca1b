//! Completion certificate.

use chrono::NaiveDate;
use examplan_core::{UserConfig, WEEKS_TOTAL};
use examplan_progress::OverallProgress;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use tracing::info;

use crate::error::{ExportError, Result};

/// Render the completion certificate as an HTML document.
///
/// Only available once the whole plan is done. The user name is escaped.
pub fn render_certificate(
    config: Option<&UserConfig>,
    overall: &OverallProgress,
    completed_on: NaiveDate,
) -> Result<String> {
    let config = config.ok_or(ExportError::NotConfigured)?;
    if overall.average_progress < 100 {
        return Err(ExportError::Incomplete {
            progress: overall.average_progress,
        });
    }

    info!(name = %config.name, "Rendering certificate");
    Ok(render_page(config, overall, completed_on).into_string())
}

fn render_page(config: &UserConfig, overall: &OverallProgress, completed_on: NaiveDate) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Certificate of Completion - Examplan" }
                style { (PreEscaped(CSS)) }
            }
            body {
                div.certificate {
                    h1 { "Certificate of Completion" }
                    h2 { "Examplan - Mathematics" }
                    p.details { "This certifies that" }
                    div.name { (config.name) }
                    p.details {
                        "has successfully completed the " (WEEKS_TOTAL) "-week preparation course"
                        br;
                        "for the mathematics exam at level "
                        strong { (config.level.code().to_uppercase()) }
                    }
                    div.stats {
                        (stat(&format!("{}/{}", overall.completed_weeks, overall.total_weeks), "Completed weeks"))
                        (stat(&format!("{}%", overall.average_quiz_score), "Average quiz score"))
                        (stat(&format!("{}%", overall.average_progress), "Overall progress"))
                    }
                    p.details {
                        "Completed on: " strong { (completed_on.format("%Y-%m-%d").to_string()) }
                        br;
                        "Exam date: " strong { (config.exam_date.format("%Y-%m-%d").to_string()) }
                    }
                    div.footer {
                        "Examplan " (completed_on.format("%Y").to_string())
                        br;
                        "Certificate generated automatically"
                    }
                }
            }
        }
    }
}

fn stat(value: &str, label: &str) -> Markup {
    html! {
        div.stat {
            div.stat-value { (value) }
            div.stat-label { (label) }
        }
    }
}

const CSS: &str = r#"
body {
    font-family: 'Georgia', serif;
    display: flex;
    justify-content: center;
    align-items: center;
    min-height: 100vh;
    margin: 0;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
}

.certificate {
    background: white;
    padding: 60px;
    max-width: 800px;
    text-align: center;
    border: 10px solid #0056b3;
    box-shadow: 0 10px 40px rgba(0,0,0,0.3);
}

.certificate h1 {
    color: #0056b3;
    font-size: 3em;
    margin: 0 0 20px 0;
    text-transform: uppercase;
    letter-spacing: 2px;
}

.certificate h2 {
    color: #333;
    font-size: 1.5em;
    margin: 30px 0;
    font-weight: normal;
}

.certificate .name {
    font-size: 2.5em;
    color: #0056b3;
    font-weight: bold;
    margin: 30px 0;
    border-bottom: 2px solid #0056b3;
    padding-bottom: 10px;
    display: inline-block;
}

.certificate .details {
    margin: 30px 0;
    font-size: 1.1em;
    line-height: 1.8;
    color: #555;
}

.certificate .stats {
    display: flex;
    justify-content: space-around;
    margin: 40px 0;
}

.certificate .stat-value {
    font-size: 2em;
    color: #0056b3;
    font-weight: bold;
}

.certificate .stat-label {
    font-size: 0.9em;
    color: #777;
    text-transform: uppercase;
    letter-spacing: 1px;
}

.certificate .footer {
    margin-top: 50px;
    padding-top: 20px;
    border-top: 1px solid #ddd;
    color: #999;
    font-size: 0.9em;
}

@media print {
    body { background: white; }
    .certificate { box-shadow: none; }
}
"#;
