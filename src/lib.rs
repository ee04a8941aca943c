#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use propel_access as access;
pub use propel_utils as utils;
