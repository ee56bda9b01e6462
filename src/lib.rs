// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod anchors;
pub mod backend;
pub mod cli;
pub mod config;
pub mod days;
pub mod error;
pub mod impact;
pub mod models;
pub mod utils;
pub mod commands;

pub use days::{DayBuckets, bucket_by_day, bucket_by_day_in};
pub use error::SplitError;
pub use impact::resolve_impact;
