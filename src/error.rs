// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VelaError>;

/// Contract violations raised by the allocation core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VelaError {
    #[error("Invalid transaction configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Amount overflow while computing {0}")]
    Overflow(&'static str),
}

impl VelaError {
    pub fn config(msg: impl Into<String>) -> Self {
        VelaError::InvalidConfiguration(msg.into())
    }
}
