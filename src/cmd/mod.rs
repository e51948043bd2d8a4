//! CLI command implementations.
//!
//! | Module    | Commands handled             |
//! |-----------|------------------------------|
//! | `serve`   | `Serve`                      |
//! | `profile` | `Groups`, `Show`, `Dashboard` |
//! | `config`  | `Config`                     |

pub mod config;
pub mod profile;
pub mod serve;

pub use config::cmd_config;
pub use profile::{cmd_dashboard, cmd_groups, cmd_show};
pub use serve::cmd_serve;
