// crates/bo_report/src/render_html.rs
//
// Offline HTML for both views. Templates are embedded; no external assets.
// Templates use the `.html` suffix so minijinja auto-escapes every field.

use minijinja::{context, Environment};

use crate::model::{ComparisonReport, RankingReport};
use crate::ReportError;

static COMPARISON_TEMPLATE: &str = r#"<!doctype html>
<html lang="en"><meta charset="utf-8">
<title>Comparison Results — {{ r.day_label }}</title>
<h1>Comparison Results</h1>
<p class="scope">{{ r.scope_label }} · {{ r.day_label }}</p>
<div class="stats-summary">
  <span class="stat">Movies: {{ r.movie_count }}</span>
  <span class="stat">Towns: {{ r.town_count }}</span>
</div>
<table class="comparison-table">
  <thead>
    <tr><th>Town</th>{% for m in r.movies %}<th>{{ m.title }}<br><small>{{ m.hero_name }}</small></th>{% endfor %}</tr>
  </thead>
  <tbody>
{% for row in r.rows %}    <tr><td class="town-cell">{{ row.town }}</td>{% for c in row.cells %}<td class="amount-cell{% if c.highest %} highest{% endif %}{% if c.absent %} absent{% endif %}">{{ c.text }}</td>{% endfor %}</tr>
{% endfor %}    <tr class="total-row"><td class="total-label">Total</td>{% for t in r.totals %}<td class="total-cell">{{ t }}</td>{% endfor %}</tr>
  </tbody>
</table>
<div class="winner-badge">
  <h3>{{ r.winner.title }}</h3>
  <p>Highest Collection: {{ r.winner.total }}{% if r.winner.tied %} (tied; listed first wins){% endif %}</p>
</div>
<footer>{{ r.id }}</footer>
</html>
"#;

static RANKING_TEMPLATE: &str = r#"<!doctype html>
<html lang="en"><meta charset="utf-8">
<title>Top {{ r.limit }} Movies by Town — {{ r.day_label }}</title>
<h1>Top {{ r.limit }} Movies by Town</h1>
<p class="search-results">{{ r.showing }}</p>
{% if r.towns %}<div class="towns-grid">
{% for t in r.towns %}  <div class="town-card">
    <h3 class="town-name">{{ t.town }}</h3>
{% if t.entries %}    <ol class="movies-list">
{% for e in t.entries %}      <li class="movie-item"><span class="rank">#{{ e.rank }}</span> <span class="movie-title">{{ e.title }}</span> <span class="hero-name">{{ e.hero_name }}</span> <span class="collection">{{ e.amount }}</span></li>
{% endfor %}    </ol>
{% else %}    <p class="no-movies">No data available</p>
{% endif %}  </div>
{% endfor %}</div>
{% elif r.total_towns == 0 %}<p class="top-no-data">No data available</p>
{% else %}<p class="no-results">No towns found matching "{{ r.search }}"</p>
{% endif %}<footer>{{ r.id }}</footer>
</html>
"#;

fn render<S: serde::Serialize>(name: &str, source: &str, r: &S) -> Result<String, ReportError> {
    let mut env = Environment::new();
    env.add_template(name, source)
        .map_err(|e| ReportError::Template(e.to_string()))?;
    let tmpl = env
        .get_template(name)
        .map_err(|e| ReportError::Template(e.to_string()))?;
    tmpl.render(context! { r => r })
        .map_err(|e| ReportError::Template(e.to_string()))
}

pub fn render_comparison_html(report: &ComparisonReport) -> Result<String, ReportError> {
    render("comparison.html", COMPARISON_TEMPLATE, report)
}

pub fn render_ranking_html(report: &RankingReport) -> Result<String, ReportError> {
    render("ranking.html", RANKING_TEMPLATE, report)
}
