pub mod command;
pub mod jumpto;
pub mod mode;
pub mod normal;
pub mod quitting;
