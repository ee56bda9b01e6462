// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors raised by the library side of tabsplit.
#[derive(Error, Debug, PartialEq)]
pub enum SplitError {
    /// A `created_at` value that could not be read as a calendar date.
    #[error("Invalid timestamp '{value}' on activity {id}")]
    InvalidTimestamp { id: i64, value: String },

    #[error("Expense {expense_id} has more than one balance entry for member {owner}")]
    DuplicateBalanceOwner { expense_id: i64, owner: i64 },

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SplitError>;
