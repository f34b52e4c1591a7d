//! # Board metrics
//!
//! OpenMetrics counters for the thread/reply lifecycle, exposed on `/metrics`.

use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    ThreadCreated,
    ReplyCreated,
    ThreadReported,
    ReplyReported,
    ThreadDeleted,
    ReplyDeleted,
    PasswordRejected,
}

impl BoardAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardAction::ThreadCreated => "thread_created",
            BoardAction::ReplyCreated => "reply_created",
            BoardAction::ThreadReported => "thread_reported",
            BoardAction::ReplyReported => "reply_reported",
            BoardAction::ThreadDeleted => "thread_deleted",
            BoardAction::ReplyDeleted => "reply_deleted",
            BoardAction::PasswordRejected => "password_rejected",
        }
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, EncodeLabelSet)]
struct ActionLabels {
    action: String,
}

pub struct BoardMetrics {
    registry: Registry,
    actions: Family<ActionLabels, Counter>,
}

impl Default for BoardMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardMetrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();
        let actions = Family::<ActionLabels, Counter>::default();
        registry.register(
            "board_actions",
            "Thread and reply lifecycle events",
            actions.clone(),
        );
        Self { registry, actions }
    }

    pub fn record(&self, action: BoardAction) {
        self.actions.get_or_create(&Self::labels(action)).inc();
    }

    pub fn count(&self, action: BoardAction) -> u64 {
        self.actions.get_or_create(&Self::labels(action)).get()
    }

    /// Text exposition of every registered metric.
    pub fn render(&self) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        encode(&mut out, &self.registry)?;
        Ok(out)
    }

    fn labels(action: BoardAction) -> ActionLabels {
        ActionLabels {
            action: action.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_action() {
        let metrics = BoardMetrics::new();
        metrics.record(BoardAction::ThreadCreated);
        metrics.record(BoardAction::ThreadCreated);
        metrics.record(BoardAction::ReplyDeleted);

        assert_eq!(metrics.count(BoardAction::ThreadCreated), 2);
        assert_eq!(metrics.count(BoardAction::ReplyDeleted), 1);
        assert_eq!(metrics.count(BoardAction::PasswordRejected), 0);
    }

    #[test]
    fn renders_openmetrics_text() {
        let metrics = BoardMetrics::new();
        metrics.record(BoardAction::ReplyCreated);

        let text = metrics.render().unwrap();
        assert!(text.contains("board_actions_total{action=\"reply_created\"} 1"));
        assert!(text.ends_with("# EOF\n"));
    }
}
