//! HTML rendering of an assembled proposal.
//!
//! Narrative sections are markdown and go through pulldown-cmark; every
//! other interpolated value is escaped.

use pulldown_cmark::{html, Event, Options, Parser};

use crate::domain::costing::{format_amount, CostEstimate};
use crate::domain::schedule::ScheduledPhase;
use crate::domain::wizard::{ResourcingPlan, RoleAllocation};
use crate::ports::ProposalDocument;

/// Builds a complete, self-contained HTML page for a proposal.
#[derive(Debug, Clone)]
pub struct ProposalHtmlBuilder {
    include_default_css: bool,
}

impl ProposalHtmlBuilder {
    pub fn new() -> Self {
        Self {
            include_default_css: true,
        }
    }

    /// Disable the built-in stylesheet.
    pub fn without_default_css(mut self) -> Self {
        self.include_default_css = false;
        self
    }

    pub fn build(&self, document: &ProposalDocument) -> String {
        let mut body = String::new();
        body.push_str(&format!("<h1>{}</h1>\n", html_escape(&document.title)));

        body.push_str(&markdown_section("Executive Summary", &document.executive_summary));
        body.push_str(&markdown_section("Introduction & Understanding", &document.introduction));
        body.push_str(&markdown_section(
            "Proposed Technical Solution",
            &document.technical_solution,
        ));

        body.push_str(&section(&timeline_html(&document.phases)));
        body.push_str(&section(&resourcing_html(document.resourcing.as_ref())));
        body.push_str(&section(&costing_html(&document.estimate, &document.notes)));

        self.wrap_html(body, &document.title)
    }

    fn wrap_html(&self, body: String, title: &str) -> String {
        let css = if self.include_default_css {
            DEFAULT_CSS
        } else {
            ""
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <article class="proposal">
{body}
    </article>
</body>
</html>"#,
            title = html_escape(title),
            css = css,
            body = body
        )
    }
}

impl Default for ProposalHtmlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts markdown to an HTML fragment.
///
/// Raw HTML in the markdown is emitted as escaped text, never as markup.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn section(inner: &str) -> String {
    format!("<section class=\"section\">\n{}</section>\n", inner)
}

fn markdown_section(title: &str, markdown: &str) -> String {
    if markdown.trim().is_empty() {
        return String::new();
    }
    section(&format!(
        "<h2>{}</h2>\n{}",
        html_escape(title),
        markdown_to_html(markdown)
    ))
}

fn timeline_html(phases: &[ScheduledPhase]) -> String {
    if phases.is_empty() {
        return "<p>No timeline data available.</p>\n".to_string();
    }

    let mut out = String::from(
        "<h3>Project Timeline</h3>\n<table>\n<thead><tr><th>Phase</th><th>Duration</th>\
         <th>Start Date</th><th>End Date</th></tr></thead>\n<tbody>\n",
    );
    for phase in phases {
        let (start, end) = match (phase.start_date(), phase.end_date()) {
            (Some(start), Some(end)) => (start.to_string(), end.to_string()),
            _ => ("Unresolved".to_string(), "Unresolved".to_string()),
        };
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(phase.name()),
            html_escape(phase.phase.duration.as_deref().unwrap_or("N/A")),
            start,
            end
        ));
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

fn resourcing_html(plan: Option<&ResourcingPlan>) -> String {
    let Some(plan) = plan else {
        return "<p>No resourcing data available.</p>\n".to_string();
    };

    let mut out = String::from("<h3>Resourcing Plan</h3>\n");
    out.push_str(&roles_table("Standard Roles", &plan.roles));
    out.push_str(&roles_table("Custom Roles", &plan.custom_roles));
    out.push_str(&format!(
        "<p><strong>Team Location Preference:</strong> {}</p>\n",
        html_escape(plan.team_location_preference_name.as_deref().unwrap_or("N/A"))
    ));
    out
}

fn roles_table(title: &str, roles: &[RoleAllocation]) -> String {
    if roles.is_empty() {
        return format!("<p>No {} defined.</p>\n", title.to_lowercase());
    }

    let mut out = format!(
        "<h4>{}</h4>\n<table>\n<thead><tr><th>Role</th><th>Quantity</th><th>FTE %</th></tr></thead>\n<tbody>\n",
        title
    );
    for role in roles {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}%</td></tr>\n",
            html_escape(&role.role_name),
            html_escape(&role.quantity.to_string()),
            html_escape(&role.fte.to_string())
        ));
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

fn costing_html(estimate: &CostEstimate, notes: &[String]) -> String {
    let currency = html_escape(&estimate.currency);
    let mut out = String::from("<h3>Cost Estimation</h3>\n");
    out.push_str(&format!(
        "<p><strong>Sub-Total Estimated Cost:</strong> {} {}</p>\n",
        currency,
        format_amount(estimate.sub_total)
    ));
    out.push_str(&format!(
        "<p><strong>Complexity Adjustment ({}):</strong> x{}</p>\n",
        html_escape(estimate.complexity_adjustment_name.as_deref().unwrap_or("N/A")),
        estimate.complexity_adjustment_factor
    ));
    out.push_str(&format!(
        "<p><strong>Total Estimated Cost:</strong> {} {}</p>\n",
        currency,
        format_amount(estimate.total)
    ));

    if !estimate.cost_by_phase.is_empty() {
        out.push_str(&format!(
            "<h4>Cost Breakdown by Phase</h4>\n<table>\n<thead><tr><th>Phase</th>\
             <th>Effort (Hours)</th><th>Estimated Cost ({})</th></tr></thead>\n<tbody>\n",
            currency
        ));
        for phase in &estimate.cost_by_phase {
            out.push_str(&format!(
                "<tr><td>{}</td><td>{} hrs</td><td>{}</td></tr>\n",
                html_escape(&phase.phase_name),
                format_amount(phase.effort_hours),
                format_amount(phase.cost)
            ));
        }
        out.push_str("</tbody>\n</table>\n");
    }

    if !notes.is_empty() {
        out.push_str("<h4>Notes</h4>\n<ul>\n");
        for note in notes {
            out.push_str(&format!("<li>{}</li>\n", html_escape(note)));
        }
        out.push_str("</ul>\n");
    }
    out
}

/// Default CSS for the proposal page, print-friendly.
const DEFAULT_CSS: &str = r#"
:root {
    --primary-color: #3498db;
    --heading-color: #2c3e50;
    --text-color: #333333;
    --border-color: #dddddd;
    --header-bg: #f2f2f2;
}

body {
    font-family: Arial, 'Helvetica Neue', sans-serif;
    font-size: 14px;
    line-height: 1.5;
    color: var(--text-color);
    margin: 40px;
}

h1, h2, h3, h4 {
    color: var(--heading-color);
}

h1 {
    text-align: center;
    margin-bottom: 30px;
}

h2 {
    border-bottom: 2px solid var(--primary-color);
    padding-bottom: 5px;
    margin-top: 30px;
}

h3 {
    margin-top: 20px;
    color: var(--primary-color);
}

table {
    width: 100%;
    border-collapse: collapse;
    margin: 15px 0;
}

th, td {
    border: 1px solid var(--border-color);
    padding: 8px;
    text-align: left;
}

th {
    background-color: var(--header-bg);
}

.section {
    margin-bottom: 30px;
}

ul {
    padding-left: 20px;
}

li {
    margin-bottom: 5px;
}

@media print {
    body {
        font-size: 11pt;
        margin: 0;
    }

    h1, h2, h3 {
        page-break-after: avoid;
    }

    table, .section {
        page-break-inside: avoid;
    }
}
"#;

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::costing::PhaseCost;
    use crate::domain::foundation::ProposalId;
    use crate::domain::schedule::Phase;
    use chrono::NaiveDate;

    fn estimate() -> CostEstimate {
        CostEstimate {
            cost_by_phase: vec![PhaseCost {
                phase_id: "discovery_planning".to_string(),
                phase_name: "Discovery & Planning".to_string(),
                business_days: 10,
                effort_hours: 80.0,
                cost: 8000.0,
                roles_breakdown: vec![],
            }],
            sub_total: 8000.0,
            complexity_adjustment_factor: 1.0,
            complexity_adjustment_name: None,
            total: 8000.0,
            currency: "USD".to_string(),
            notes: vec!["Assumed 8 working hours per day.".to_string()],
        }
    }

    fn document() -> ProposalDocument {
        let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        ProposalDocument {
            proposal_id: ProposalId::new(),
            title: ProposalDocument::DEFAULT_TITLE.to_string(),
            executive_summary: "We propose **a web platform**.".to_string(),
            introduction: "| a | b |\n|---|---|\n| 1 | 2 |\n".to_string(),
            technical_solution: String::new(),
            phases: vec![
                ScheduledPhase::scheduled(
                    Phase::new("discovery_planning", "Discovery & Planning", Some("2 weeks".into())),
                    10,
                    start,
                    end,
                ),
                ScheduledPhase::unresolved(Phase::new("uat", "UAT <final>", None)),
            ],
            estimate: estimate(),
            resourcing: Some(ResourcingPlan {
                roles: vec![RoleAllocation {
                    role_id: "project_manager".to_string(),
                    role_name: "Project Manager".to_string(),
                    quantity: 1.0.into(),
                    fte: "100".into(),
                }],
                custom_roles: vec![],
                team_location_preference: Some("hybrid".to_string()),
                team_location_preference_name: Some("Hybrid".to_string()),
            }),
            notes: vec!["Phase 'UAT <final>' could not be scheduled.".to_string()],
        }
    }

    #[test]
    fn builds_complete_document_with_sections() {
        let html = ProposalHtmlBuilder::new().build(&document());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Software Development Proposal</h1>"));
        assert!(html.contains("<h2>Executive Summary</h2>"));
        assert!(html.contains("<strong>a web platform</strong>"));
        assert!(html.contains("<h2>Introduction &amp; Understanding</h2>"));
        assert!(html.contains("<table>"));
        assert!(!html.contains("Proposed Technical Solution"));
    }

    #[test]
    fn timeline_shows_dates_and_unresolved_marker() {
        let html = ProposalHtmlBuilder::new().build(&document());
        assert!(html.contains(
            "<tr><td>Discovery &amp; Planning</td><td>2 weeks</td><td>2024-06-03</td><td>2024-06-14</td></tr>"
        ));
        assert!(html.contains("<td>UAT &lt;final&gt;</td><td>N/A</td><td>Unresolved</td>"));
    }

    #[test]
    fn resourcing_and_costs_are_rendered() {
        let html = ProposalHtmlBuilder::new().build(&document());
        assert!(html.contains("<tr><td>Project Manager</td><td>1</td><td>100%</td></tr>"));
        assert!(html.contains("<p>No custom roles defined.</p>"));
        assert!(html.contains("Team Location Preference:</strong> Hybrid"));
        assert!(html.contains("USD 8,000.00"));
        assert!(html.contains("Complexity Adjustment (N/A):</strong> x1"));
        assert!(html.contains("<td>80.00 hrs</td>"));
    }

    #[test]
    fn notes_are_escaped() {
        let html = ProposalHtmlBuilder::new().build(&document());
        assert!(html.contains("<li>Phase &#39;UAT &lt;final&gt;&#39; could not be scheduled.</li>"));
    }

    #[test]
    fn missing_resourcing_has_placeholder() {
        let mut doc = document();
        doc.resourcing = None;
        doc.phases.clear();
        let html = ProposalHtmlBuilder::new().without_default_css().build(&doc);
        assert!(html.contains("No resourcing data available."));
        assert!(html.contains("No timeline data available."));
        assert!(!html.contains("--primary-color"));
    }

    #[test]
    fn raw_html_in_markdown_is_rendered_as_text() {
        let html = markdown_to_html("<script>x</script>\n\ntext <b>bold</b> **strong**");
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<strong>strong</strong>"));
    }

    #[test]
    fn html_escape_handles_special_characters() {
        assert_eq!(html_escape("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
