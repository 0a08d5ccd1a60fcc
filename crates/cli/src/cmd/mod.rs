mod hook;
mod info;

pub use hook::cmd_hook;
pub use info::cmd_info;
