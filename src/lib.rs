//! # FlashVault uploader
//!
//! Client side of a FlashVault file server: checks free space, uploads
//! files one at a time with progress and ETA, and deletes remote files.
//!
//! The [`services::upload_controller::UploadController`] holds the logic and
//! talks to the server through [`services::vault_client::VaultApi`] and to
//! the user through [`services::upload_view::UploadView`], so it runs the
//! same in the terminal and in tests.

#![forbid(unsafe_code)]

pub mod cli;
pub mod components;
pub mod model;
pub mod services;
pub mod settings;
pub mod utils;
