//! The editor session: one owner for timeline, transport and tick scheduling.

pub mod editor;
