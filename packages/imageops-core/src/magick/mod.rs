pub mod command;
pub mod runner;

pub use command::{build_args, operation_args, output_format};
pub use runner::{ImageMagick, ToolOutput};
