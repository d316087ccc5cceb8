pub mod image_device;
