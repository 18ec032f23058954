use league_ledger::{OwnerStanding, ScoredPick, Standings, TOP_N};

const STYLE: &str = r#"        <style>
            .container {
                display: flex;
                flex-wrap: wrap;
                justify-content: space-around;
            }
            .row {
                display: flex;
                width: 100%;
                justify-content: space-around;
                margin-bottom: 20px;
            }
            table {
                width: 50%;
                border-collapse: collapse;
                margin: 20px auto;
                word-wrap: break-word;
            }
            table, th, td {
                border: 1px solid black;
            }
            th, td {
                padding: 10px;
                text-align: center;
                word-break: break-word;
            }
            .ranking-table {
                margin: 20px auto;
                text-align: center;
            }
            h1 {
                text-align: center;
            }
            .timestamp {
                text-align: left;
                font-weight: bold;
                margin: 10px 0;
            }
        </style>
"#;

/// Page-level settings that are not part of the standings
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Document `<title>`
    pub title: String,
    /// Pre-formatted "Last updated" stamp
    pub updated_at: String,
    /// Owner tables per flex row
    pub owners_per_row: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "Fantasy Basketball Results".to_string(),
            updated_at: String::new(),
            owners_per_row: 3,
        }
    }
}

/// Escape text for use in element content and single- or double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Cost as entered on the roster: `20`, `0.75`, `1.5`
pub fn format_cost(cost: f64) -> String {
    cost.to_string()
}

/// Render the full standings page
pub fn render_html(standings: &Standings, options: &ReportOptions) -> String {
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html>\n<html>\n    <head>\n");
    html.push_str("        <meta charset=\"utf-8\">\n");
    html.push_str(&format!("        <title>{}</title>\n", escape_html(&options.title)));
    html.push_str(STYLE);
    html.push_str("    </head>\n    <body>\n");

    html.push_str(&format!(
        "        <div class=\"timestamp\">\n            <p>Last updated: {}</p>\n        </div>\n",
        escape_html(&options.updated_at)
    ));

    html.push_str(&ranking_section(&standings.ranking));
    html.push_str(&value_section(&standings.top_value));
    html.push_str(&low_cost_section(&standings.top_low_cost, standings.low_cost_threshold));

    html.push_str("        <h1>Rankings</h1>\n        <div class=\"container\">\n            ");
    html.push_str(&owner_tables(&standings.ranking, options.owners_per_row));
    html.push_str("\n        </div>\n    </body>\n</html>\n");

    html
}

fn ranking_section(ranking: &[OwnerStanding]) -> String {
    let rows: String = ranking
        .iter()
        .map(|owner| {
            format!("<tr><td>{}</td><td>{}</td></tr>", escape_html(&owner.name), owner.total_wins)
        })
        .collect();

    format!(
        "        <div class=\"ranking-table\">\n            <table>\n                <tr>\n                    <th>Owner</th>\n                    <th>Total Points</th>\n                </tr>\n                {rows}\n            </table>\n        </div>\n"
    )
}

fn value_section(picks: &[ScoredPick]) -> String {
    let rows: String = picks
        .iter()
        .map(|pick| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.2}</td></tr>",
                escape_html(&pick.owner_name),
                escape_html(&pick.team),
                pick.wins,
                pick.cost,
                pick.value
            )
        })
        .collect();

    format!(
        "        <div class=\"ranking-table\">\n            <h2>Top {TOP_N} Teams by Value (Wins - Cost)</h2>\n            <table>\n                <tr>\n                    <th>Owner</th>\n                    <th>Team</th>\n                    <th>Wins</th>\n                    <th>Cost</th>\n                    <th>Value</th>\n                </tr>\n                {rows}\n            </table>\n        </div>\n"
    )
}

fn low_cost_section(picks: &[ScoredPick], threshold: f64) -> String {
    let rows: String = picks
        .iter()
        .map(|pick| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td></tr>",
                escape_html(&pick.owner_name),
                escape_html(&pick.team),
                pick.wins,
                pick.cost
            )
        })
        .collect();

    format!(
        "        <div class=\"ranking-table\">\n            <h2>Most Wins with Cost ≤ {}</h2>\n            <table>\n                <tr>\n                    <th>Owner</th>\n                    <th>Team</th>\n                    <th>Wins</th>\n                    <th>Cost</th>\n                </tr>\n                {rows}\n            </table>\n        </div>\n",
        format_cost(threshold)
    )
}

fn owner_table(owner: &OwnerStanding) -> String {
    let place = owner.place.map(|p| format!(" ({})", p.label())).unwrap_or_default();

    let mut table =
        format!("<table><caption><h2>{}{place}</h2></caption>", escape_html(&owner.name));
    table.push_str("<tr><th>Teams</th><th>Points</th><th>Cost</th></tr>");

    for pick in &owner.picks {
        table.push_str(&format!(
            "<tr><td class='team-col'>{}</td><td class='points-col'>{}</td><td class='cost-col'>{}</td></tr>",
            escape_html(&pick.team),
            pick.wins,
            format_cost(pick.cost)
        ));
    }

    table.push_str(&format!("<tr><td>Total</td><td>{}</td><td>-</td></tr>", owner.total_wins));
    table.push_str("</table>");
    table
}

/// Owner tables in ranking order, `per_row` to a row div
fn owner_tables(ranking: &[OwnerStanding], per_row: usize) -> String {
    let per_row = per_row.max(1);

    ranking
        .chunks(per_row)
        .map(|chunk| {
            let tables: String = chunk.iter().map(owner_table).collect();
            format!("<div class='row'>{tables}</div>")
        })
        .collect()
}
