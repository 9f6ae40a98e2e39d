use std::fmt::Write;

use crate::dashboard::DashboardView;
use crate::form::FormStatus;
use crate::render::dashboard::render_dashboard;
use crate::render::escape;
use crate::shell::{Shell, ShellState};

/// Seconds between reloads while a grading request is in flight.
const GRADING_REFRESH_SECS: u32 = 2;

const STYLES: &str = r#"
body{margin:0;font-family:system-ui,sans-serif;background:#f8fafc;color:#0f172a}
header{background:#fff;border-bottom:1px solid #e2e8f0;padding:0 2rem;height:4rem;display:flex;align-items:center;justify-content:space-between}
header h1{font-size:1.25rem;margin:0}
main{max-width:72rem;margin:0 auto;padding:2rem 1rem;display:flex;flex-direction:column;gap:2rem}
.intro{text-align:center;max-width:40rem;margin:0 auto}
.card{background:#fff;border:1px solid #e2e8f0;border-radius:.75rem;padding:1.5rem}
.grid-2{display:grid;grid-template-columns:repeat(auto-fit,minmax(20rem,1fr));gap:1.5rem}
.row{display:flex;justify-content:space-between;align-items:center}
.muted{color:#64748b}
textarea{width:100%;min-height:20rem;box-sizing:border-box;font-family:Georgia,serif;padding:1rem;background:#0f172a;color:#f1f5f9;border-radius:.375rem}
input[type=text]{width:100%;box-sizing:border-box;padding:.5rem;background:#0f172a;color:#f1f5f9;border-radius:.375rem}
button{padding:.6rem 1.5rem;border-radius:.5rem;border:0;background:#4f46e5;color:#fff;font-weight:600;cursor:pointer}
button:disabled{background:#cbd5e1;cursor:not-allowed}
button.link{background:none;color:#dc2626;text-decoration:underline;padding:0}
.warning{color:#d97706;font-size:.75rem}
.spinner{width:3rem;height:3rem;border:4px solid #e0e7ff;border-top-color:#4f46e5;border-radius:50%;animation:spin 1s linear infinite}
@keyframes spin{to{transform:rotate(360deg)}}
.error-panel{background:#fef2f2;border-color:#fecaca;color:#991b1b}
.score-card{display:flex;gap:1.5rem;align-items:center}
.score-ring{display:flex;flex-direction:column;align-items:center;justify-content:center;width:8rem;height:8rem;border-radius:50%;border:4px solid currentColor;flex-shrink:0}
.score{font-size:2.25rem;font-weight:700}
.pill,.chip,.tone{padding:.125rem .5rem;border-radius:.375rem;font-size:.8rem;font-weight:600}
.chip{background:#f3e8ff;color:#6b21a8;display:inline-block;margin:.25rem}
.criteria-list{max-height:20rem;overflow-y:auto}
.criterion,.metric{background:#f8fafc;border-radius:.5rem;padding:.75rem;margin-bottom:.75rem}
.radar{width:100%;max-height:20rem}
.radar .grid{fill:none;stroke:#e2e8f0}
.radar .spoke{stroke:#e2e8f0}
.radar text{font-size:9px;fill:#64748b}
.radar .score-area{fill:#4f46e5;fill-opacity:.4;stroke:#4f46e5;stroke-width:2}
.band-emerald,.tier-emerald{color:#059669;background:#ecfdf5}
.band-green{color:#047857;background:#d1fae5}
.band-blue,.tier-blue{color:#2563eb;background:#eff6ff}
.band-amber,.tier-amber{color:#d97706;background:#fffbeb}
.band-red,.tier-red{color:#dc2626;background:#fef2f2}
@media (max-width:64rem){.desktop-only{display:none}}
"#;

const SCRIPT: &str = r#"
(() => {
  const form = document.getElementById('essay-form');
  if (!form) return;
  const essay = form.querySelector('textarea');
  const count = document.getElementById('word-count');
  const warning = document.getElementById('short-warning');
  const submit = document.getElementById('grade-button');
  const file = document.getElementById('file-upload');
  const minWords = Number(form.dataset.minWords);
  const warnWords = Number(form.dataset.warnWords);
  const update = () => {
    const words = essay.value.trim().split(/\s+/).filter(Boolean).length;
    count.textContent = words + ' words';
    warning.hidden = !(words > 0 && words < warnWords);
    if (!essay.disabled) submit.disabled = words < minWords;
  };
  essay.addEventListener('input', update);
  file.addEventListener('change', () => {
    form.action = '/upload';
    form.submit();
  });
})();
"#;

/// Renders the whole page for the shell's current state.
pub fn render_page(shell: &Shell) -> String {
    let refresh = if shell.state.is_grading() {
        format!(r#"<meta http-equiv="refresh" content="{GRADING_REFRESH_SECS}">"#)
    } else {
        String::new()
    };

    let mut body = String::new();

    if matches!(shell.state, ShellState::Idle) {
        body.push_str(
            r#"<div class="intro"><h2>Academic Essay Evaluation</h2><p class="muted">Get instant, university-level feedback on your writing. Our AI analyzes your argument, structure, and style to help you improve your grades.</p></div>"#,
        );
    }

    let form_class = match shell.state {
        ShellState::Complete { .. } => "desktop-only",
        _ => "",
    };
    let _ = write!(
        body,
        r#"<div class="{form_class}">{}</div>"#,
        render_form(shell)
    );

    match &shell.state {
        ShellState::Idle => {}
        ShellState::Grading { .. } => body.push_str(
            r#"<section class="card" style="display:flex;flex-direction:column;align-items:center"><div class="spinner"></div><h3>Analyzing your work...</h3><p class="muted">Reviewing thesis, checking citations, and evaluating structure. This usually takes about 10-20 seconds.</p></section>"#,
        ),
        ShellState::Error { message } => {
            let _ = write!(
                body,
                r#"<section class="card error-panel"><h3>Grading Failed</h3><p>{}</p><form method="post" action="/retry"><button class="link" type="submit">Try Again</button></form></section>"#,
                escape(message)
            );
        }
        ShellState::Complete { result } => {
            body.push_str(&render_dashboard(&DashboardView::build(result)));
            body.push_str(
                r#"<form method="post" action="/reset"><button type="submit">Grade Another Essay</button></form>"#,
            );
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}
<title>ProfAI - Essay Grader</title>
<style>{STYLES}</style>
</head>
<body>
<header><h1>ProfAI</h1><span class="muted">University Grade Level</span></header>
<main>
{body}
</main>
<script>{SCRIPT}</script>
</body>
</html>
"#
    )
}

fn render_form(shell: &Shell) -> String {
    let status: FormStatus = shell.form_status();
    let disabled = if status.controls_disabled { " disabled" } else { "" };
    let submit_disabled = if status.submit_enabled { "" } else { " disabled" };
    let warning_hidden = if status.short_warning { "" } else { " hidden" };
    let button_label = if status.controls_disabled {
        "Grading..."
    } else {
        "Grade Essay"
    };

    format!(
        r#"<section class="card">
<h2>Submit Your Work</h2>
<form id="essay-form" method="post" action="/grade" enctype="multipart/form-data" data-min-words="{min_words}" data-warn-words="{warn_words}">
<label for="prompt">Assignment Prompt (Optional)</label>
<input type="text" id="prompt" name="prompt" value="{prompt}" placeholder="e.g. Discuss the socio-economic impacts of..."{disabled}>
<textarea name="essay" placeholder="Paste your essay here..."{disabled}>
{essay}</textarea>
<div class="row">
<span id="word-count" class="muted">{words} words</span>
<span><input type="file" id="file-upload" name="file" accept=".txt,.md"{disabled}> <button type="submit" formaction="/upload" formnovalidate{disabled}>Upload .txt</button></span>
<button type="submit" id="grade-button"{submit_disabled}>{button_label}</button>
</div>
<div id="short-warning" class="warning"{warning_hidden}>Essay is too short for a proper university-level grade.</div>
</form>
</section>"#,
        min_words = shell.thresholds.min_submit_words,
        warn_words = shell.thresholds.short_warning_words,
        prompt = escape(&shell.draft.prompt_text),
        essay = escape(&shell.draft.essay_text),
        words = status.word_count,
    )
}
