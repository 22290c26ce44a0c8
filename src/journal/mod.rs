pub mod draft;
pub mod export;
pub mod repository;
pub mod types;

pub use draft::{EntryDraft, Submission};
pub use repository::Journal;
pub use types::{JournalEntry, JournalPrompt, PromptCategory};
