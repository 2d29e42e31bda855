//! Server-rendered HTML. Every interpolated value goes through [`html_escape`].

use std::fmt::Write as _;

use chrono::Utc;

use crate::charts::ChartImage;
use crate::data::RankingTable;

pub struct RankingPage<'a> {
    pub table: &'a RankingTable,
    pub chart: Option<&'a ChartImage>,
    pub years: &'a [String],
    pub selected_year: &'a str,
    pub notice: Option<&'a str>,
}

pub struct TrendPage<'a> {
    pub regions: &'a [&'a str],
    pub selected_region: &'a str,
    pub years: &'a [String],
    pub from: i32,
    pub to: i32,
    pub chart: Option<&'a ChartImage>,
    pub error: Option<&'a str>,
    pub notice: Option<&'a str>,
}

pub fn index_html() -> String {
    layout(
        "Ceny mieszkań w województwach",
        r#"<p>Średnia cena 1 m² mieszkań według danych Banku Danych Lokalnych GUS.</p>
<ul>
  <li><a href="/ranking">Ranking województw</a></li>
  <li><a href="/trend">Trend cen w województwie</a></li>
</ul>"#,
    )
}

pub fn ranking_html(page: &RankingPage<'_>) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        r#"<form method="post" action="/ranking">
  <label for="rok">Rok</label>
  <select id="rok" name="rok">{options}</select>
  <button type="submit">Pokaż</button>
</form>
"#,
        options = year_options(page.years, page.selected_year),
    );
    push_message(&mut body, "notice", page.notice);

    if page.table.is_empty() {
        let _ = write!(
            body,
            "<p>Brak danych dla roku {}.</p>\n",
            html_escape(page.selected_year)
        );
    } else {
        body.push_str("<table>\n");
        body.push_str("<tr><th>#</th><th>Województwo</th><th>Cena za 1m² (zł)</th></tr>\n");
        for (position, row) in page.table.rows.iter().enumerate() {
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{:.2}</td></tr>",
                position + 1,
                html_escape(&row.region),
                row.value
            );
        }
        body.push_str("</table>\n");
    }
    push_chart(&mut body, page.chart, "Top 10 województw wg ceny 1m²");

    layout(&format!("Ranking {}", page.selected_year), &body)
}

pub fn trend_html(page: &TrendPage<'_>) -> String {
    let region_options: String = page
        .regions
        .iter()
        .map(|name| option_tag(name, *name == page.selected_region))
        .collect();
    let from = page.from.to_string();
    let to = page.to.to_string();

    let mut body = String::new();
    let _ = write!(
        body,
        r#"<form method="post" action="/trend">
  <label for="wojewodztwo">Województwo</label>
  <select id="wojewodztwo" name="wojewodztwo">{region_options}</select>
  <label for="od">Od</label>
  <select id="od" name="od">{from_options}</select>
  <label for="do">Do</label>
  <select id="do" name="do">{to_options}</select>
  <button type="submit">Pokaż</button>
</form>
"#,
        from_options = year_options(page.years, &from),
        to_options = year_options(page.years, &to),
    );
    push_message(&mut body, "error", page.error);
    push_message(&mut body, "notice", page.notice);
    push_chart(
        &mut body,
        page.chart,
        &format!("Zmiana ceny 1m² mieszkań – {}", page.selected_region),
    );

    layout(&format!("Trend – {}", page.selected_region), &body)
}

pub fn placeholder_html(title: &str) -> String {
    layout(title, "<p>Ta strona jest w przygotowaniu.</p>")
}

pub fn login_html() -> String {
    layout(
        "Logowanie",
        r#"<form>
  <label for="username">Użytkownik</label>
  <input id="username" name="username" />
  <label for="password">Hasło</label>
  <input id="password" name="password" type="password" />
  <button type="button" disabled>Zaloguj</button>
</form>"#,
    )
}

pub fn not_found_html() -> String {
    layout("Nie znaleziono", "<p>Nie ma takiej strony.</p>")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="pl">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>{title}</title>
  <style>
    body {{ font-family: Arial, sans-serif; max-width: 1040px; margin: 24px auto; padding: 0 12px; }}
    nav a {{ margin-right: 12px; }}
    table {{ border-collapse: collapse; margin: 12px 0; }}
    td, th {{ border: 1px solid #ddd; padding: 4px 10px; }}
    .error {{ color: #b00020; }}
    .notice {{ color: #8a6d00; }}
    img {{ max-width: 100%; }}
    footer {{ margin-top: 24px; color: #888; font-size: 0.85rem; }}
  </style>
</head>
<body>
  <nav><a href="/">Start</a><a href="/ranking">Ranking</a><a href="/trend">Trend</a><a href="/wykres">Wykres</a><a href="/mapa">Mapa</a><a href="/login">Logowanie</a></nav>
  <h1>{title}</h1>
{body}
  <footer>Źródło: GUS, Bank Danych Lokalnych. Wygenerowano {generated}.</footer>
</body>
</html>
"#,
        title = html_escape(title),
        body = body,
        generated = Utc::now().format("%Y-%m-%d %H:%M UTC"),
    )
}

fn year_options(years: &[String], selected: &str) -> String {
    years
        .iter()
        .map(|year| option_tag(year, year == selected))
        .collect()
}

fn option_tag(value: &str, selected: bool) -> String {
    let value = html_escape(value);
    let selected = if selected { " selected" } else { "" };
    format!(r#"<option value="{value}"{selected}>{value}</option>"#)
}

fn push_message(body: &mut String, class: &str, message: Option<&str>) {
    if let Some(message) = message {
        let _ = writeln!(body, r#"<p class="{class}">{}</p>"#, html_escape(message));
    }
}

fn push_chart(body: &mut String, chart: Option<&ChartImage>, alt: &str) {
    if let Some(chart) = chart {
        let _ = writeln!(
            body,
            r#"<img id="chart" alt="{}" src="{}" />"#,
            html_escape(alt),
            chart.data_uri()
        );
    }
}

pub fn html_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
