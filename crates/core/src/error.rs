// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use nml_offers_domain::DomainError;
use std::error::Error;
use std::fmt;

/// Failure of a draft edit or an offer tracker operation.
///
/// The rejected operation leaves the draft and tracker unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A line item or status change broke an offer rule.
    DomainViolation(DomainError),
}

impl CoreError {
    /// The offer rule that was broken.
    #[must_use]
    pub const fn domain_error(&self) -> &DomainError {
        match self {
            Self::DomainViolation(err) => err,
        }
    }

    #[must_use]
    pub fn into_domain(self) -> DomainError {
        match self {
            Self::DomainViolation(err) => err,
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Offer rule violated: {err}"),
        }
    }
}

impl Error for CoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.domain_error())
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
