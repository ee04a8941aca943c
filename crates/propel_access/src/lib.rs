#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod access;
pub mod info;

mod cache;
mod compile;
mod lookup;

#[cfg(test)]
mod fixtures;
