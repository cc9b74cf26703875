//! Configuration of the uploader: server address, target directory and timings

pub mod client_settings;
