// Terminal-facing output formatting.

pub mod terminal;
