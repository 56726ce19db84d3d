use scraper_core::Msg;

pub const HELP_TEXT: &str = "\
Commands:
  scrape <industry> | <location>   start a scrape job
  next | prev | page <n>           move between result pages
  export                           write the full result set to CSV
  email                            send the full result set to the dispatch endpoint
  show                             redraw the current view
  help                             show this text
  quit                             exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Msg(Msg),
    Show,
    Help,
    Quit,
    Invalid(String),
}

/// Parse one line of operator input.
pub fn parse_line(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "scrape" => parse_scrape(rest),
        "next" | "n" => Command::Msg(Msg::PageNext),
        "prev" | "p" => Command::Msg(Msg::PagePrev),
        "page" => match rest.parse::<usize>() {
            Ok(page) => Command::Msg(Msg::PageSelected(page)),
            Err(_) => Command::Invalid(format!("not a page number: {rest:?}")),
        },
        "export" | "csv" => Command::Msg(Msg::ExportRequested),
        "email" | "send" => Command::Msg(Msg::DispatchRequested),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Invalid(format!("unknown command: {other}")),
    };
    Some(command)
}

fn parse_scrape(rest: &str) -> Command {
    let Some((industry, location)) = rest.split_once('|') else {
        return Command::Invalid("usage: scrape <industry> | <location>".to_string());
    };
    let (industry, location) = (industry.trim(), location.trim());
    if industry.is_empty() || location.is_empty() {
        return Command::Invalid("industry and location are both required".to_string());
    }
    Command::Msg(Msg::ScrapeSubmitted {
        industry: industry.to_string(),
        location: location.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrape_splits_on_pipe_and_trims() {
        assert_eq!(
            parse_line("scrape  Private Schools |  Hyderabad "),
            Some(Command::Msg(Msg::ScrapeSubmitted {
                industry: "Private Schools".to_string(),
                location: "Hyderabad".to_string(),
            }))
        );
    }

    #[test]
    fn scrape_requires_both_fields() {
        assert!(matches!(parse_line("scrape Schools"), Some(Command::Invalid(_))));
        assert!(matches!(parse_line("scrape | Pune"), Some(Command::Invalid(_))));
        assert!(matches!(parse_line("scrape Schools |"), Some(Command::Invalid(_))));
    }

    #[test]
    fn paging_and_actions() {
        assert_eq!(parse_line("next"), Some(Command::Msg(Msg::PageNext)));
        assert_eq!(parse_line("PREV"), Some(Command::Msg(Msg::PagePrev)));
        assert_eq!(parse_line("page 3"), Some(Command::Msg(Msg::PageSelected(3))));
        assert!(matches!(parse_line("page x"), Some(Command::Invalid(_))));
        assert_eq!(parse_line("export"), Some(Command::Msg(Msg::ExportRequested)));
        assert_eq!(parse_line("email"), Some(Command::Msg(Msg::DispatchRequested)));
        assert_eq!(parse_line("quit"), Some(Command::Quit));
        assert_eq!(parse_line("   "), None);
    }
}
