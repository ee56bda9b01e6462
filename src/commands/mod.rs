// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod feed;
pub mod impact;
pub mod groups;
pub mod exporter;
pub mod settings;
