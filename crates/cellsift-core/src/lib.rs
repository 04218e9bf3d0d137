pub mod cell;
pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod io;
pub mod selection;
pub mod session;
pub mod trace;
pub mod viewport;
pub mod visibility;
