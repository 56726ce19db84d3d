/// Message shown as soon as a job is submitted, before the first tick.
pub const INITIAL_PROGRESS_MESSAGE: &str = "Starting to scrape data...";

const FOLLOW_UP_MESSAGES: &[&str] = &[
    "Gathering business information...",
    "Fetching phone numbers...",
    "Retrieving email addresses...",
    "Collecting website URLs...",
    "Processing location data...",
    "Almost done, compiling results...",
];

/// Number of ticks the ticker delivers before stopping on its own.
pub const PROGRESS_STEPS: usize = FOLLOW_UP_MESSAGES.len() + 1;

/// Message for tick number `step` (1-based). `None` once the sequence is exhausted.
pub fn progress_message(industry: &str, step: usize) -> Option<String> {
    match step {
        0 => Some(INITIAL_PROGRESS_MESSAGE.to_string()),
        1 => Some(format!("Started scraping {industry} data...")),
        n => FOLLOW_UP_MESSAGES.get(n - 2).map(|msg| (*msg).to_string()),
    }
}
