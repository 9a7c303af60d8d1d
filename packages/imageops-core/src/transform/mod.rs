pub mod descriptor;
pub mod inspect;
pub mod operation;
pub mod params;
pub mod payload;

pub use descriptor::TransformationSpec;
pub use inspect::{inspect, ImageInfo};
pub use operation::{FilterOptions, Operation, OperationKind, ToolOperation, WatermarkOptions};
pub use params::OutputFormat;
pub use payload::{decode_image_data, encode_base64, to_data_uri};
