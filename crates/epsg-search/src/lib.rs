#![deny(unsafe_code)]

pub mod autocomplete;
pub mod code_filter;
pub mod deferred;
pub mod index;

pub use autocomplete::{
    AutocompleteSession, EditOutcome, NUM_INITIAL_OPTIONS, SessionState, SessionTask,
};
pub use code_filter::{MAX_CODE_VALUE, MIN_CODE_VALUE, accepts_edit, is_valid_code_text};
pub use deferred::DeferredQueue;
pub use index::{CodeIndex, Searchable};
