//! Domain building blocks of the parametría configuration service.
//!
//! Pure logic only: identifiers, closed value sets, the generic
//! filter/sort/paginate pipeline, lookup results, the response envelope and
//! validation of template API operations. Persistence lives in
//! `parametria-db`, HTTP in `parametria-api` and `parametria-template`.

pub mod catalog;
pub mod envelope;
pub mod error;
pub mod listing;
pub mod lookup;
pub mod operation;
pub mod types;
