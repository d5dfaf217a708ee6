//! Command bodies behind the `logmon` binary.
//!
//! - **run**: follow the access log and redraw a dashboard every refresh period, resetting
//!   the short-term stats after each frame
//! - **generate**: append synthetic access log lines, to exercise a running monitor
//! - **config**: check, dump or initialize a config file

pub mod conf;
pub mod generate;
pub mod render;
pub mod run;
