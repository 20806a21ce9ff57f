//! Core business logic for folder overviews.
//!
//! This module provides:
//! - [`settings`] parsing, normalization and editing of overview configurations
//! - [`filter`], [`sort`] and [`tree`]: the pure render pipeline
//! - [`blocks`], [`link_list`] and [`write_queue`]: text-block synchronization
//! - [`events`] and [`index`]: change propagation and global resync
//! - [`MemoryVault`] and [`VaultHost`]: the in-memory host the pipeline runs on

pub mod blocks;
pub mod error;
pub mod events;
pub mod filter;
pub mod frontmatter;
pub mod host;
pub mod index;
pub mod link_list;
pub mod overview;
pub mod settings;
pub mod sort;
pub mod title;
pub mod tree;
pub mod vault;
pub mod write_queue;

pub use host::{HostCollaborator, VaultHost};
pub use overview::{OverviewBody, OverviewRender, prepare};
pub use vault::MemoryVault;
