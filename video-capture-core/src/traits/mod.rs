pub mod camera_provider;
pub mod recorder_delegate;
pub mod video_encoder;
