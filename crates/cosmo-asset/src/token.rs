// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Monotonic request tokens for discarding stale load results.

use core::fmt;

use tracing::warn;

/// Identifier of one load request. Later requests compare greater until the
/// counter wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw counter value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues strictly increasing tokens.
#[derive(Debug, Default)]
pub struct TokenCounter {
    last: u64,
}

impl TokenCounter {
    /// Create a counter; the first issued token is `#1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next token.
    ///
    /// Every issued token differs from the one before it. After `u64::MAX`
    /// the counter wraps to `#1`; only the current token is ever matched, so
    /// a wrap cannot revive the previous request.
    pub fn issue(&mut self) -> RequestToken {
        self.last = self.last.checked_add(1).unwrap_or_else(|| {
            warn!("request token counter wrapped");
            1
        });
        RequestToken(self.last)
    }

    /// Most recently issued token, if any.
    pub fn latest(&self) -> Option<RequestToken> {
        (self.last > 0).then_some(RequestToken(self.last))
    }

    /// True when `token` is the most recently issued one.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest() == Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_increase() {
        let mut c = TokenCounter::new();
        assert_eq!(c.latest(), None);
        let a = c.issue();
        let b = c.issue();
        assert!(b > a);
        assert!(c.is_current(b));
        assert!(!c.is_current(a));
    }

    #[test]
    fn exhausted_counter_wraps_to_a_fresh_token() {
        let mut c = TokenCounter { last: u64::MAX - 1 };
        let top = c.issue();
        assert_eq!(top.get(), u64::MAX);
        let wrapped = c.issue();
        assert_eq!(wrapped.get(), 1);
        assert_ne!(wrapped, top);
        assert!(c.is_current(wrapped));
        assert!(!c.is_current(top));
    }
}
