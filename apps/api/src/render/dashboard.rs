use std::fmt::Write;

use crate::dashboard::radar::{svg_points, RadarChart, VIEWBOX};
use crate::dashboard::{DashboardView, StylePanel};
use crate::render::escape;

/// Renders the results dashboard: score card, radar and criteria, style panel,
/// strengths and improvements.
pub fn render_dashboard(view: &DashboardView) -> String {
    let mut html = String::new();
    let card = &view.score_card;

    let _ = write!(
        html,
        r#"<section class="card score-card band-{color}">
  <div class="score-ring"><span class="score">{score}</span><span class="out-of">/ 100</span></div>
  <div><h2>Overall Grade: {grade}</h2><p class="summary">{summary}</p></div>
</section>
"#,
        color = card.band.color(),
        score = card.score,
        grade = escape(&card.letter_grade),
        summary = escape(&card.summary),
    );

    html.push_str(r#"<div class="grid-2">"#);
    let _ = write!(
        html,
        r#"<section class="card"><h3>Competency Map</h3>{}</section>"#,
        render_radar(&view.radar)
    );

    html.push_str(r#"<section class="card"><h3>Detailed Criteria</h3><div class="criteria-list">"#);
    for item in &view.criteria {
        let _ = write!(
            html,
            r#"<div class="criterion"><div class="row"><span class="name">{name}</span><span class="pill band-{color}">{score}%</span></div><p class="feedback">{feedback}</p></div>"#,
            name = escape(&item.name),
            color = item.band.color(),
            score = item.score,
            feedback = escape(&item.feedback),
        );
    }
    html.push_str("</div></section></div>\n");

    html.push_str(&render_style(&view.style));

    html.push_str(r#"<div class="grid-2">"#);
    html.push_str(&render_list("Key Strengths", "strengths", &view.strengths));
    html.push_str(&render_list(
        "Areas for Improvement",
        "improvements",
        &view.improvements,
    ));
    html.push_str("</div>\n");

    html
}

fn render_radar(chart: &RadarChart) -> String {
    if chart.axes.is_empty() {
        return r#"<p class="muted">No criteria returned.</p>"#.to_string();
    }

    let mut svg = format!(
        r#"<svg class="radar" viewBox="0 0 {VIEWBOX} {VIEWBOX}" role="img" aria-label="Criteria radar chart">"#
    );
    for ring in &chart.grid {
        let _ = write!(svg, r#"<polygon class="grid" points="{}"/>"#, svg_points(ring));
    }
    let center = VIEWBOX / 2.0;
    for axis in &chart.axes {
        let _ = write!(
            svg,
            r#"<line class="spoke" x1="{center:.1}" y1="{center:.1}" x2="{:.1}" y2="{:.1}"/><text x="{:.1}" y="{:.1}" text-anchor="middle"><title>{subject}: {value} / {full_mark}</title>{subject}</text>"#,
            axis.spoke_end.x,
            axis.spoke_end.y,
            axis.label.x,
            axis.label.y,
            subject = escape(&axis.subject),
            value = axis.value,
            full_mark = axis.full_mark,
        );
    }
    let _ = write!(
        svg,
        r#"<polygon class="score-area" points="{}"/></svg>"#,
        svg_points(&chart.polygon)
    );
    svg
}

fn render_style(style: &StylePanel) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<section class="card style-panel"><h3>Style &amp; Tone Analysis</h3><p class="muted">Detected Tone: <span class="tone">{}</span></p><div class="grid-2">"#,
        escape(&style.tone)
    );
    for metric in &style.metrics {
        let _ = write!(
            html,
            r#"<div class="metric"><div class="row"><h4>{category}</h4><span class="pill tier-{tier}">{rating}</span></div><p class="feedback">{feedback}</p></div>"#,
            category = escape(&metric.category),
            tier = metric.tier.color(),
            rating = escape(&metric.rating),
            feedback = escape(&metric.feedback),
        );
    }
    html.push_str("</div>");

    if !style.suggestions.is_empty() {
        html.push_str(r#"<h4>Suggestions</h4><div class="chips">"#);
        for suggestion in &style.suggestions {
            let _ = write!(html, r#"<span class="chip">{}</span>"#, escape(suggestion));
        }
        html.push_str("</div>");
    }
    html.push_str("</section>\n");
    html
}

fn render_list(title: &str, class: &str, items: &[String]) -> String {
    let mut html = format!(r#"<section class="card {class}"><h3>{title}</h3><ul>"#);
    for item in items {
        let _ = write!(html, "<li>{}</li>", escape(item));
    }
    html.push_str("</ul></section>");
    html
}
