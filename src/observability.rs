use biometrics::{Collector, Counter, Moments};

pub(crate) static SUBMISSIONS: Counter = Counter::new("teletype.session.submissions");
pub(crate) static SUBMISSIONS_REJECTED: Counter =
    Counter::new("teletype.session.submissions_rejected");

pub(crate) static EXCHANGE_REQUESTS: Counter = Counter::new("teletype.exchange.requests");
pub(crate) static EXCHANGE_FAILURES: Counter = Counter::new("teletype.exchange.failures");
pub(crate) static EXCHANGE_FALLBACKS: Counter = Counter::new("teletype.exchange.fallbacks");
pub(crate) static EXCHANGE_DURATION: Moments =
    Moments::new("teletype.exchange.duration_seconds");

pub(crate) static REVEAL_TICKS: Counter = Counter::new("teletype.typewriter.ticks");
pub(crate) static REVEAL_EMPTY_REPLIES: Counter =
    Counter::new("teletype.typewriter.empty_replies");
pub(crate) static REVEAL_DURATION: Moments =
    Moments::new("teletype.typewriter.duration_seconds");

pub(crate) static NOTICE_AUTO_HIDDEN: Counter = Counter::new("teletype.notice.auto_hidden");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&SUBMISSIONS);
    collector.register_counter(&SUBMISSIONS_REJECTED);

    collector.register_counter(&EXCHANGE_REQUESTS);
    collector.register_counter(&EXCHANGE_FAILURES);
    collector.register_counter(&EXCHANGE_FALLBACKS);
    collector.register_moments(&EXCHANGE_DURATION);

    collector.register_counter(&REVEAL_TICKS);
    collector.register_counter(&REVEAL_EMPTY_REPLIES);
    collector.register_moments(&REVEAL_DURATION);

    collector.register_counter(&NOTICE_AUTO_HIDDEN);
}
