use crate::{normalize_response, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ScrapeSubmitted { industry, location } => state.begin_job(industry, location),
        Msg::ProgressTick { job_id } => {
            state.advance_progress(job_id);
            Vec::new()
        }
        Msg::ScrapeCompleted { job_id, result } => {
            let outcome = result.map(|body| normalize_response(&body));
            state.resolve_job(job_id, outcome).into_iter().collect()
        }
        Msg::PageNext => {
            let next = state.current_page() + 1;
            state.set_page(next);
            Vec::new()
        }
        Msg::PagePrev => {
            let prev = state.current_page().saturating_sub(1);
            state.set_page(prev);
            Vec::new()
        }
        Msg::PageSelected(page) => {
            state.set_page(page);
            Vec::new()
        }
        Msg::ExportRequested => state.request_export().into_iter().collect(),
        Msg::ExportCompleted { result } => {
            state.record_export(result);
            Vec::new()
        }
        Msg::DispatchRequested => state.begin_dispatch().into_iter().collect(),
        Msg::DispatchCompleted { seq, result } => {
            state.resolve_dispatch(seq, result).into_iter().collect()
        }
        Msg::DispatchNoticeExpired { seq } => {
            state.expire_notice(seq);
            Vec::new()
        }
    };

    (state, effects)
}
