pub mod cloudinary;
pub mod constants;
pub mod errors;
pub mod magick;
pub mod response;
pub mod transform;
pub mod validation;

// 公開API
pub use cloudinary::{CloudinaryClient, CloudinaryConfig, ImageHost, UploadedAsset};
pub use errors::{HostedError, ImageOpsError, RequestError, ToolError};
pub use magick::{ImageMagick, ToolOutput};
pub use response::{HostedResult, LocalResult, Variations, FETCH_FALLBACK_WARNING};
pub use transform::{
    decode_image_data, encode_base64, inspect, to_data_uri, ImageInfo, Operation, OperationKind,
    OutputFormat, ToolOperation, TransformationSpec,
};
pub use validation::{Params, ProcessingRequest};
