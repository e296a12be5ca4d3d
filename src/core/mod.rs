pub mod chat;
pub mod dates;
pub mod filters;
pub mod handoff;
pub mod paging;
pub mod route;

pub use chat::{ChatHistory, TurnState, CONTEXT_WINDOW};
pub use dates::normalize_date;
pub use filters::SearchFilters;
pub use handoff::{BookingDraft, DraftState, Handoff};
pub use paging::{PageOutcome, PageTicket, PagedResults};
pub use route::{NavigationHistory, QueryParams, Route};
