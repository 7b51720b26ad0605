//! The tool catalog: what each generation tool needs and produces.

pub mod catalog;
