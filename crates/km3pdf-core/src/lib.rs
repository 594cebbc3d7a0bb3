//! Muon and shower PDF evaluation for an underwater Cherenkov telescope.
//!
//! The evaluators convert vertex-relative hit quantities into the
//! detector-relative arguments of a probability-table lookup. The
//! tables themselves are injected collaborators behind the traits in
//! [`table`]; the muon energy loss lives in [`geane`].

pub mod evaluator;
pub mod geane;
pub mod table;
