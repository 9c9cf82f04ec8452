//! Analysis passes run over a parsed program.

pub mod unreachable;
