// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory bearer token shared by clones of the client.

use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Holds the current access token, if any.
///
/// Clones share the same slot. The token is never persisted.
#[derive(Debug, Clone, Default)]
pub struct TokenHolder {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenHolder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A holder that starts out with `token`.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let holder: Self = Self::new();
        holder.set(token);
        holder
    }

    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, token: &str) {
        debug!("Storing access token");
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    pub fn clear(&self) {
        debug!("Clearing access token");
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_token() {
        let holder: TokenHolder = TokenHolder::new();
        let other: TokenHolder = holder.clone();

        holder.set("abc");
        assert_eq!(other.get().as_deref(), Some("abc"));

        other.clear();
        assert!(!holder.is_authenticated());
    }
}
