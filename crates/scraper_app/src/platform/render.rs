use std::fmt::Write;

use scraper_core::{AppViewModel, DataRow, JobStatus};

const NOTICE_TEXT: &str = "Success! Email sent successfully with the scraped data.";

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    let status = match view.status {
        JobStatus::Idle => "Idle",
        JobStatus::Running => "Scraping...",
        JobStatus::Succeeded => "Done",
        JobStatus::Failed => "Failed",
    };
    match (&view.industry, &view.location) {
        (Some(industry), Some(location)) => {
            let _ = writeln!(out, "[{status}] {industry} in {location}");
        }
        _ => {
            let _ = writeln!(out, "[{status}]");
        }
    }
    if let Some(message) = &view.progress_message {
        let _ = writeln!(out, "  {message}");
    }
    if let Some(error) = &view.error_banner {
        let _ = writeln!(out, "Error: {error}");
    }
    if view.dispatch_notice {
        let _ = writeln!(out, "{NOTICE_TEXT}");
    }
    if view.dispatch_in_flight {
        let _ = writeln!(out, "Sending...");
    }

    if view.total_rows == 0 {
        return out;
    }

    let _ = writeln!(out, "Results ({} records)", view.total_rows);
    let _ = writeln!(out, "School Name | Number | Address | Website | Email");
    for row in &view.page_rows {
        let _ = writeln!(out, "{}", render_row(row));
    }

    if view.total_pages > 1 {
        if let Some((first, last)) = view.showing {
            let _ = write!(
                out,
                "Showing {first} to {last} of {} records (page {}/{})",
                view.total_rows, view.current_page, view.total_pages
            );
        }
        if view.has_prev {
            out.push_str(" [prev]");
        }
        if view.has_next {
            out.push_str(" [next]");
        }
        out.push('\n');
    }
    if let Some(path) = &view.last_export {
        let _ = writeln!(out, "Last export: {}", path.display());
    }
    out
}

fn render_row(row: &DataRow) -> String {
    format!(
        "{} | {} | {} | {} | {}",
        row.school_name,
        row.number,
        row.address,
        row.website,
        row.email.as_deref().unwrap_or("N/A")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper_core::{update, AppState, Msg};
    use serde_json::json;

    fn loaded(n: usize) -> AppViewModel {
        let (state, _) = update(
            AppState::new(),
            Msg::ScrapeSubmitted {
                industry: "Schools".to_string(),
                location: "Pune".to_string(),
            },
        );
        let data: Vec<_> = (1..=n)
            .map(|i| json!({ "SchoolName": format!("S{i}"), "Number": "1" }))
            .collect();
        let (state, _) = update(
            state,
            Msg::ScrapeCompleted {
                job_id: 1,
                result: Ok(json!({ "data": data })),
            },
        );
        state.view()
    }

    #[test]
    fn running_view_shows_progress() {
        let (state, _) = update(
            AppState::new(),
            Msg::ScrapeSubmitted {
                industry: "Schools".to_string(),
                location: "Pune".to_string(),
            },
        );
        let text = render(&state.view());
        assert!(text.starts_with("[Scraping...] Schools in Pune"));
        assert!(text.contains("Starting to scrape data..."));
    }

    #[test]
    fn results_show_range_and_controls() {
        let text = render(&loaded(45));
        assert!(text.contains("Results (45 records)"));
        assert!(text.contains("S1 | 1 |  | N/A | N/A"));
        assert!(!text.contains("S21 |"));
        assert!(text.contains("Showing 1 to 20 of 45 records (page 1/3) [next]"));
    }

    #[test]
    fn single_page_has_no_pager() {
        let text = render(&loaded(3));
        assert!(!text.contains("Showing"));
    }
}
