pub mod controller;
pub mod coordinator;
pub mod device_selector;
pub mod emitter;
pub mod encoder_config;
