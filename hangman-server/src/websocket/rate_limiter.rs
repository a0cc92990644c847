use std::time::{Duration, Instant};

/// Token bucket guarding one connection's incoming messages
#[derive(Debug, Clone)]
pub struct RateLimiter {
    tokens: u32,
    max_tokens: u32,
    refill_rate: Duration,
    last_refill: Instant,
}

impl RateLimiter {
    pub fn new() -> Self {
        // A full alphabet of clicks in a burst, then two messages a second
        Self::new_with_limits(30, Duration::from_millis(500))
    }

    pub fn new_with_limits(max_tokens: u32, refill_rate: Duration) -> Self {
        Self {
            tokens: max_tokens,
            max_tokens,
            refill_rate,
            last_refill: Instant::now(),
        }
    }

    pub fn check_rate_limit(&mut self) -> bool {
        self.refill_tokens();

        if self.tokens > 0 {
            self.tokens -= 1;
            true
        } else {
            false
        }
    }

    fn refill_tokens(&mut self) {
        let refill_millis = self.refill_rate.as_millis();
        if refill_millis == 0 {
            self.tokens = self.max_tokens;
            return;
        }

        let elapsed = self.last_refill.elapsed();
        let tokens_to_add = elapsed.as_millis() / refill_millis;
        if tokens_to_add > 0 {
            let added = u32::try_from(tokens_to_add).unwrap_or(u32::MAX);
            self.tokens = self.tokens.saturating_add(added);
            if self.tokens >= self.max_tokens {
                self.tokens = self.max_tokens;
                self.last_refill = Instant::now();
            } else {
                // Keep the remainder so partial intervals are not lost
                self.last_refill += self.refill_rate * added;
            }
        }
    }

    pub fn get_remaining_tokens(&mut self) -> u32 {
        self.refill_tokens();
        self.tokens
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
