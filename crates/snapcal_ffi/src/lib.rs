//! Flutter bridge surface for snapcal core.

pub mod api;
