pub mod cli;
pub mod epub;
pub mod error;
pub mod util;
