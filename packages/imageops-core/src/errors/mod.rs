mod types;

pub use types::{HostedError, ImageOpsError, RequestError, ToolError};
