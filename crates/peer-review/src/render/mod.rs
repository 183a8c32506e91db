//! Template renderer producing the Form 1 application markup.
//!
//! Rendering is total: every field read goes through the submission's default-valued
//! accessors, so any payload (including an empty one) yields a complete document.

mod layout;

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate};

use crate::config::DocumentConfig;
use crate::form::{keys, ApplyReason, ConductedAnswer, FormSubmission, ReviewerOption};

pub use layout::{FORM_HEADING, NEW_UNIT_HEADING};

/// Glyph for a ticked box.
pub const CHECKED: &str = "✓";
/// Glyph for an empty box.
pub const UNCHECKED: &str = "☐";
/// Markup token replacing newlines in multi-line text.
pub const LINE_BREAK: &str = "<br>";

fn glyph(checked: bool) -> &'static str {
    if checked {
        CHECKED
    } else {
        UNCHECKED
    }
}

/// Renders submissions into the fixed regulatory layout.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    date_format: String,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new(DocumentConfig::DEFAULT_DATE_FORMAT)
    }
}

impl TemplateRenderer {
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }

    pub fn from_config(config: &DocumentConfig) -> Self {
        Self::new(config.date_format.clone())
    }

    pub fn render(&self, submission: &FormSubmission) -> String {
        let sections = [
            layout::DOCUMENT_OPEN.to_string(),
            layout::LETTER_HEAD.to_string(),
            self.declarations(submission),
            services_table(submission),
            closing_declarations(submission),
            format!(
                "<p style=\"text-align: center; text-decoration: underline; margin-top: 20px;\"><strong>{}</strong></p>\n",
                layout::NEW_UNIT_HEADING
            ),
            layout::DOCUMENT_CLOSE.to_string(),
        ];
        sections.concat()
    }

    /// Short date for a submitted date field, empty when absent.
    ///
    /// Accepts `YYYY-MM-DD` and RFC 3339 timestamps; anything else is echoed as submitted.
    pub fn format_date(&self, submission: &FormSubmission, key: &str) -> String {
        let Some(raw) = submission.non_blank(key) else {
            return String::new();
        };

        let parsed = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(&raw)
                    .ok()
                    .map(|stamp| stamp.date_naive())
            });

        match parsed {
            Some(date) => {
                let mut formatted = String::new();
                match write!(formatted, "{}", date.format(&self.date_format)) {
                    Ok(()) => formatted,
                    Err(_) => date.format("%Y-%m-%d").to_string(),
                }
            }
            None => raw,
        }
    }

    fn declarations(&self, submission: &FormSubmission) -> String {
        let start = self.format_date(submission, keys::REVIEW_START_DATE);
        let end = self.format_date(submission, keys::REVIEW_END_DATE);

        let reasons: String = ApplyReason::ALL
            .iter()
            .zip(layout::APPLY_REASON_LABELS)
            .map(|(reason, label)| {
                let suffix = match reason {
                    ApplyReason::Mandatory => format!(
                        " {}",
                        dotted(&submission.text(keys::OTHER_REGULATOR))
                    ),
                    _ => String::new(),
                };
                format!(
                    "        <li>{} {label}{suffix}</li>\n",
                    checkbox(submission.has_reason(*reason))
                )
            })
            .collect();

        format!(
            "<ol>\n\
             <li>Our Firm {firm} ; FRN/ M. No {frn} would like to apply for Peer Review for the period from {start} to {end} (three preceding financial years from the date of application). We have gone through the Peer Review Guidelines 2022 hosted at <a href=\"{url}\">{url}</a> and undertake to abide by the same.</li>\n\
             <li>I/We hereby declare that my/our firm is applying for Peer Review (Tick the applicable clause):\n\
             <ol class=\"lower-roman\">\n{reasons}</ol>\n</li>\n\
             <li>{intro}</li>\n\
             </ol>\n",
            firm = dotted(&submission.text(keys::FIRM_NAME)),
            frn = dotted(&submission.text(keys::FIRM_REG_NUMBER)),
            start = dotted(&start),
            end = dotted(&end),
            url = layout::GUIDELINES_URL,
            intro = layout::SERVICES_INTRO,
        )
    }
}

/// Renders with the default en-US short date format.
pub fn render(submission: &FormSubmission) -> String {
    TemplateRenderer::default().render(submission)
}

/// Replaces embedded newlines (`\n` or `\r\n`) with the markup line break.
pub fn address_lines(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\n', LINE_BREAK)
}

fn dotted(value: &str) -> String {
    format!("<span class=\"dotted-field\">{value}</span>")
}

fn checkbox(checked: bool) -> String {
    format!("<span class=\"checkbox\">{}</span>", glyph(checked))
}

fn services_table(submission: &FormSubmission) -> String {
    let rows: String = layout::ASSURANCE_SERVICES
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let service = if index + 1 == layout::ASSURANCE_SERVICES.len() {
                format!("{label} {}", submission.text(keys::OTHER_SERVICE))
            } else {
                (*label).to_string()
            };
            format!(
                "<tr>\n    <td>{}</td>\n    <td>{service}</td>\n    <td>{}</td>\n</tr>\n",
                index + 1,
                submission.client_type(index)
            )
        })
        .collect();

    format!(
        "<table>\n{}{rows}</table>\n",
        layout::SERVICES_TABLE_HEADER
    )
}

fn closing_declarations(submission: &FormSubmission) -> String {
    let conducted = submission.conducted();

    let options: String = ReviewerOption::ALL
        .iter()
        .zip(layout::REVIEWER_OPTION_LABELS)
        .map(|(option, label)| {
            let suffix = match option {
                ReviewerOption::PreferredCity => {
                    format!(" {}", submission.text(keys::PREFERRED_CITY))
                }
                _ => String::new(),
            };
            format!(
                "        <li>{} {label}{suffix}</li>\n",
                checkbox(submission.has_reviewer_option(*option))
            )
        })
        .collect();

    format!(
        "<ol start=\"4\">\n\
         <li>I / We hereby declare that my/ our firm {yes} has conducted {no} has not conducted {tail}</li>\n\
         <li>Option for appointment of Reviewer: (Tick appropriate option)\n\
         <ol class=\"lower-roman\">\n{options}</ol>\n</li>\n\
         <li>Mail Id for communication with the Practice unit {email}</li>\n\
         <li>Address for sending the Peer Review Certificate{br}{address}</li>\n\
         </ol>\n",
        yes = checkbox(conducted == ConductedAnswer::Yes),
        no = checkbox(conducted == ConductedAnswer::No),
        tail = layout::LISTED_AUDIT_TAIL,
        email = dotted(&submission.text(keys::COMMUNICATION_EMAIL)),
        br = LINE_BREAK,
        address = address_lines(&submission.text(keys::CERTIFICATE_ADDRESS)),
    )
}
