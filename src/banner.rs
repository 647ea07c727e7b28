use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

pub const AUTO_CLEAR: Duration = Duration::from_secs(5);

/// One error region. Every message arms its own clear timer; a newer message
/// replaces the text but leaves older timers running, so the earliest pending
/// timer clears whatever text is showing when it fires.
#[derive(Debug, Default, Clone)]
pub struct ErrorBanner {
    message: String,
    pending: VecDeque<Instant>,
}

impl ErrorBanner {
    pub fn show(&mut self, message: impl Into<String>) {
        let now = Instant::now();
        while self.pending.front().is_some_and(|deadline| *deadline <= now) {
            self.pending.pop_front();
        }
        self.pending.push_back(now + AUTO_CLEAR);
        self.message = message.into();
    }

    pub fn text(&self) -> &str {
        match self.pending.front() {
            Some(deadline) if *deadline > Instant::now() => &self.message,
            _ => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Greeting,
    Audience,
    Combo,
}

#[derive(Debug, Default, Clone)]
pub struct Banners {
    greeting: ErrorBanner,
    audience: ErrorBanner,
    combo: ErrorBanner,
}

impl Banners {
    pub fn get(&self, region: Region) -> &ErrorBanner {
        match region {
            Region::Greeting => &self.greeting,
            Region::Audience => &self.audience,
            Region::Combo => &self.combo,
        }
    }

    pub fn show(&mut self, region: Region, message: impl Into<String>) {
        let banner = match region {
            Region::Greeting => &mut self.greeting,
            Region::Audience => &mut self.audience,
            Region::Combo => &mut self.combo,
        };
        banner.show(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn message_clears_after_five_seconds() {
        let mut banner = ErrorBanner::default();
        banner.show("Test error");
        assert_eq!(banner.text(), "Test error");

        tokio::time::advance(Duration::from_millis(4_999)).await;
        assert_eq!(banner.text(), "Test error");

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(banner.text(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn older_timer_clears_newer_message() {
        let mut banner = ErrorBanner::default();
        banner.show("first");
        tokio::time::advance(Duration::from_secs(3)).await;
        banner.show("second");
        assert_eq!(banner.text(), "second");

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(banner.text(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn message_after_expiry_gets_fresh_timer() {
        let mut banner = ErrorBanner::default();
        banner.show("first");
        tokio::time::advance(Duration::from_secs(6)).await;
        banner.show("second");

        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(banner.text(), "second");
    }

    #[test]
    fn regions_are_independent() {
        let mut banners = Banners::default();
        banners.show(Region::Combo, "boom");
        assert_eq!(banners.get(Region::Combo).text(), "boom");
        assert_eq!(banners.get(Region::Greeting).text(), "");
    }
}
