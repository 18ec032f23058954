use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::types::{TeamWins, WinsTable};

/// Suffix the stats page appends to schools that made the tournament
const TOURNAMENT_MARKER: &str = "NCAA";

/// Season school-stats scraper
pub struct WinsScraper {
    client: Client,
    config: ScraperConfig,
}

impl WinsScraper {
    /// Create a new scraper from config
    pub fn new(config: ScraperConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub fn season_url(&self, season: u16) -> String {
        self.config.season_url(season)
    }

    /// Fetch the stats page for a season and parse every team's win total
    pub async fn scrape_season(&self, season: u16) -> Result<WinsTable> {
        let url = self.season_url(season);
        info!(season, url = %url, "Fetching school stats");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status { status, url });
        }

        let html = response.text().await?;
        debug!("Fetched HTML ({} bytes)", html.len());

        let rows = parse_wins_table(&html, &self.config.table_id, self.config.wins_column)?;
        let table = WinsTable::from_rows(season, url, rows);

        info!(season, teams = table.len(), "Parsed school stats");
        Ok(table)
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ScrapeError::Selector { selector: css.to_string(), message: e.to_string() })
}

/// Extract (school, wins) rows from the stats table.
///
/// Rows without a `wins_column` cell (repeated header rows) and rows whose
/// wins cell is not a plain integer are skipped.
pub fn parse_wins_table(html: &str, table_id: &str, wins_column: usize) -> Result<Vec<TeamWins>> {
    let document = Html::parse_document(html);

    let table_selector = selector(&format!("table#{table_id}"))?;
    let row_selector = selector(&format!("table#{table_id} > tbody > tr"))?;

    if document.select(&table_selector).next().is_none() {
        return Err(ScrapeError::TableNotFound { table_id: table_id.to_string() });
    }

    let mut rows = Vec::new();
    for row in document.select(&row_selector) {
        // Direct cells only; nested markup inside a cell is not a column
        let cells: Vec<ElementRef> = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "td")
            .collect();
        if cells.len() <= wins_column {
            continue;
        }

        let school = school_name(&cell_text(&cells[0]));
        let wins_text = cell_text(&cells[wins_column]);

        match parse_wins(&wins_text) {
            Some(wins) if !school.is_empty() => rows.push(TeamWins { school, wins }),
            _ => debug!("Skipping row '{}' with wins '{}'", school, wins_text),
        }
    }

    Ok(rows)
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn school_name(raw: &str) -> String {
    match raw.strip_suffix(TOURNAMENT_MARKER) {
        Some(stripped) => stripped.trim().to_string(),
        None => raw.to_string(),
    }
}

fn parse_wins(text: &str) -> Option<u32> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const STATS_PAGE: &str = r#"
        <html><body>
        <table id="basic_school_stats">
          <thead><tr><th>Rk</th><th>School</th><th>G</th><th>W</th><th>L</th></tr></thead>
          <tbody>
            <tr><th>1</th><td><a href="/cbb/schools/abilene-christian/">Abilene Christian</a></td><td>31</td><td>15</td><td>16</td></tr>
            <tr><th>2</th><td><a href="/cbb/schools/alabama/">Alabama</a>&nbsp;NCAA</td><td>36</td><td>28</td><td>8</td></tr>
            <tr class="thead"><th>Rk</th><th>School</th><th>G</th><th>W</th><th>L</th></tr>
            <tr><th>3</th><td>Saint Mary's (CA) NCAA</td><td>35</td><td>29</td><td>6</td></tr>
            <tr><th>4</th><td>Texas A&amp;M</td><td>33</td><td></td><td>10</td></tr>
            <tr><th>5</th><td>Nevada-Las Vegas</td><td>33</td><td>18*</td><td>15</td></tr>
          </tbody>
        </table>
        </body></html>
    "#;

    fn row(school: &str, wins: u32) -> TeamWins {
        TeamWins { school: school.to_string(), wins }
    }

    #[test]
    fn test_parse_wins_table() {
        let rows = parse_wins_table(STATS_PAGE, "basic_school_stats", 2).unwrap();

        assert_eq!(
            rows,
            vec![row("Abilene Christian", 15), row("Alabama", 28), row("Saint Mary's (CA)", 29)]
        );
    }

    #[test]
    fn test_parse_with_earlier_column_layout() {
        let rows = parse_wins_table(STATS_PAGE, "basic_school_stats", 1).unwrap();

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], row("Abilene Christian", 31));
        assert_eq!(rows[3], row("Texas A&M", 33));
    }

    #[test]
    fn test_missing_table() {
        let html = "<html><body><p>nothing</p></body></html>";
        let err = parse_wins_table(html, "basic_school_stats", 2).unwrap_err();

        assert!(matches!(
            err,
            ScrapeError::TableNotFound { ref table_id } if table_id == "basic_school_stats"
        ));
    }

    #[test]
    fn test_empty_table_yields_no_rows() {
        let html = r#"<table id="basic_school_stats"><tbody></tbody></table>"#;
        let rows = parse_wins_table(html, "basic_school_stats", 2).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_nested_table_rows_are_ignored() {
        let html = r#"
            <table id="basic_school_stats"><tbody>
              <tr><th>1</th><td>Duke</td><td>35</td><td>31</td></tr>
              <tr><th>2</th><td>Houston</td><td>34</td><td>30</td><td><table><tbody>
                <tr><td>Conference</td><td>20</td><td>19</td></tr>
              </tbody></table></td></tr>
            </tbody></table>
        "#;

        let rows = parse_wins_table(html, "basic_school_stats", 2).unwrap();

        assert_eq!(rows, vec![row("Duke", 31), row("Houston", 30)]);
    }

    #[test]
    fn test_school_name_marker() {
        assert_eq!(school_name("Houston NCAA"), "Houston");
        assert_eq!(school_name("Houston"), "Houston");
        assert_eq!(school_name("NCAA"), "");
    }

    /// Serve one canned HTTP response and return the base URL
    async fn serve_once(status_line: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}")
    }

    fn local_config(base: &str) -> ScraperConfig {
        ScraperConfig {
            url_template: format!("{base}/cbb/seasons/men/{{season}}-school-stats.html"),
            ..ScraperConfig::default()
        }
    }

    #[tokio::test]
    async fn test_scrape_season() {
        let base = serve_once("200 OK", STATS_PAGE.to_string()).await;
        let scraper = WinsScraper::new(local_config(&base)).unwrap();

        let table = scraper.scrape_season(2026).await.unwrap();

        assert_eq!(table.season, 2026);
        assert_eq!(table.source_url, format!("{base}/cbb/seasons/men/2026-school-stats.html"));
        assert_eq!(table.len(), 3);
        assert_eq!(table.wins_for("Alabama"), Some(28));
    }

    #[tokio::test]
    async fn test_scrape_season_http_error() {
        let base = serve_once("429 Too Many Requests", String::new()).await;
        let scraper = WinsScraper::new(local_config(&base)).unwrap();

        let err = scraper.scrape_season(2026).await.unwrap_err();

        match err {
            ScrapeError::Status { status, url } => {
                assert_eq!(status.as_u16(), 429);
                assert!(url.ends_with("2026-school-stats.html"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
