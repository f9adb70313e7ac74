//! Category hierarchy engine.
//!
//! Categories form a forest through plain parent-id references. The engine
//! renders that forest from a flat scan, cascades inactivation down the
//! hierarchy, and deletes nodes while promoting their children to the deleted
//! node's parent.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
