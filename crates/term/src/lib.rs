//! Terminal presentation: flushes shaded pixel frames to a real terminal.

pub mod presenter;

pub use presenter::TermPresenter;
