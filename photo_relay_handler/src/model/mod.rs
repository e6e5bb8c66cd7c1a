pub mod key;
pub mod notification;

pub use key::DeliveryMetadata;
pub use notification::UploadNotification;
