//! Global yes/no confirmation gate.
//!
//! Any component can `await` a decision before firing a state-changing call:
//!
//! ```rust,ignore
//! let confirm = use_confirm();
//! let decision = confirm.confirm(ConfirmOptions::new("Eliminar", "¿Eliminar el producto?").danger());
//! if let Some(result) = gated(decision, || api::delete(&client, id)).await { ... }
//! ```
//!
//! One request is pending at most. A new request replaces the pending one,
//! which resolves to `false`.

mod host;

pub use host::ConfirmHost;

use futures::channel::oneshot;
use leptos::prelude::*;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Styling hint only; never changes behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Default,
    Brand,
    Danger,
    Warning,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Default => "confirm--default",
            Tone::Brand => "confirm--brand",
            Tone::Danger => "confirm--danger",
            Tone::Warning => "confirm--warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmOptions {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub tone: Tone,
}

impl ConfirmOptions {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_text: "Confirmar".to_string(),
            cancel_text: "Cancelar".to_string(),
            tone: Tone::Default,
        }
    }

    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = text.into();
        self
    }

    pub fn cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = text.into();
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn danger(self) -> Self {
        self.tone(Tone::Danger)
    }
}

/// Resolves to the user's answer; a dropped request counts as `false`
#[must_use = "a decision does nothing unless awaited"]
pub struct Decision(oneshot::Receiver<bool>);

impl Future for Decision {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        Pin::new(&mut self.0).poll(cx).map(|r| r.unwrap_or(false))
    }
}

struct Pending {
    id: u64,
    options: ConfirmOptions,
    reply: oneshot::Sender<bool>,
}

/// The single pending-confirmation slot
#[derive(Default)]
pub struct ConfirmSlot {
    next_id: u64,
    pending: Option<Pending>,
}

impl ConfirmSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a request, resolving any pending one to `false`
    pub fn open(&mut self, options: ConfirmOptions) -> (u64, Decision) {
        if let Some(previous) = self.pending.take() {
            log::debug!("confirm #{} superseded", previous.id);
            let _ = previous.reply.send(false);
        }

        self.next_id += 1;
        let (reply, rx) = oneshot::channel();
        self.pending = Some(Pending {
            id: self.next_id,
            options,
            reply,
        });
        (self.next_id, Decision(rx))
    }

    /// Answers the pending request. Returns false when nothing was pending.
    pub fn resolve(&mut self, answer: bool) -> bool {
        match self.pending.take() {
            Some(pending) => {
                let _ = pending.reply.send(answer);
                true
            }
            None => false,
        }
    }

    /// Answers request `id` only if it is still the pending one
    pub fn resolve_if(&mut self, id: u64, answer: bool) -> bool {
        if self.current_id() != Some(id) {
            return false;
        }
        self.resolve(answer)
    }

    pub fn current(&self) -> Option<&ConfirmOptions> {
        self.pending.as_ref().map(|p| &p.options)
    }

    pub fn current_id(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.id)
    }
}

/// Runs `action` only when `decision` resolves to `true`.
///
/// The action future is not even created on a negative answer.
pub async fn gated<T, F, Fut>(decision: impl Future<Output = bool>, action: F) -> Option<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    if decision.await {
        Some(action().await)
    } else {
        None
    }
}

/// Context service backing [`ConfirmHost`]
#[derive(Clone, Copy)]
pub struct ConfirmService {
    slot: StoredValue<ConfirmSlot, LocalStorage>,
    current: RwSignal<Option<ConfirmOptions>>,
}

impl ConfirmService {
    pub fn new() -> Self {
        Self {
            slot: StoredValue::new_local(ConfirmSlot::new()),
            current: RwSignal::new(None),
        }
    }

    /// Shows the dialog and returns the pending decision
    pub fn confirm(&self, options: ConfirmOptions) -> Decision {
        let shown = options.clone();
        let opened = self.slot.try_update_value(|slot| slot.open(options));
        match opened {
            Some((_, decision)) => {
                self.current.set(Some(shown));
                decision
            }
            None => {
                // owner already disposed: answer "no"
                let (tx, rx) = oneshot::channel();
                let _ = tx.send(false);
                Decision(rx)
            }
        }
    }

    /// Answers request `id`; a request that replaced it stays open
    pub fn resolve_request(&self, id: u64, answer: bool) {
        let answered = self
            .slot
            .try_update_value(|slot| slot.resolve_if(id, answer))
            .unwrap_or(false);
        if answered {
            self.current.set(None);
        }
    }

    /// Answers "no" to whatever is pending
    pub fn dismiss(&self) {
        self.slot.try_update_value(|slot| slot.resolve(false));
        self.current.try_set(None);
    }

    pub fn current_id(&self) -> Option<u64> {
        self.slot.try_with_value(ConfirmSlot::current_id).flatten()
    }

    pub fn current(&self) -> Option<ConfirmOptions> {
        self.current.get()
    }

    pub fn is_open(&self) -> bool {
        self.current.with(Option::is_some)
    }
}

impl Default for ConfirmService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_confirm() -> ConfirmService {
    use_context::<ConfirmService>()
        .expect("ConfirmService not provided in context (provide it in app root)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::ready;
    use std::cell::Cell;

    fn opts() -> ConfirmOptions {
        ConfirmOptions::new("Pausar usuario", "¿Pausar a Luis?")
    }

    #[test]
    fn test_confirm_and_cancel_resolve() {
        let mut slot = ConfirmSlot::new();
        let (_, decision) = slot.open(opts());
        assert_eq!(slot.current().map(|o| o.title.as_str()), Some("Pausar usuario"));
        assert!(slot.resolve(true));
        assert!(block_on(decision));
        assert!(slot.current().is_none());

        let (_, decision) = slot.open(opts());
        slot.resolve(false);
        assert!(!block_on(decision));
    }

    #[test]
    fn test_new_request_supersedes_pending() {
        let mut slot = ConfirmSlot::new();
        let (first_id, first) = slot.open(opts());
        let (second_id, second) = slot.open(opts().danger());
        assert_ne!(first_id, second_id);
        assert!(!block_on(first));

        assert_eq!(slot.current_id(), Some(second_id));
        assert_eq!(slot.current().map(|o| o.tone), Some(Tone::Danger));
        slot.resolve(true);
        assert!(block_on(second));
    }

    #[test]
    fn test_dropped_slot_answers_false() {
        let decision = {
            let mut slot = ConfirmSlot::new();
            slot.open(opts()).1
        };
        assert!(!block_on(decision));
    }

    #[test]
    fn test_stale_answer_leaves_replacement_open() {
        let mut slot = ConfirmSlot::new();
        let (first_id, first) = slot.open(opts());
        let (second_id, second) = slot.open(opts().danger());
        // click on the first dialog lands after the second replaced it
        assert!(!slot.resolve_if(first_id, true));
        assert!(!block_on(first));
        assert_eq!(slot.current_id(), Some(second_id));

        assert!(slot.resolve_if(second_id, true));
        assert!(block_on(second));
    }

    #[test]
    fn test_resolve_without_pending() {
        let mut slot = ConfirmSlot::new();
        assert!(!slot.resolve(true));
    }

    #[test]
    fn test_gated_skips_action_on_no() {
        let ran = Cell::new(false);
        let result = block_on(gated(ready(false), || {
            ran.set(true);
            ready(1)
        }));
        assert_eq!(result, None);
        assert!(!ran.get());

        let result = block_on(gated(ready(true), || ready(7)));
        assert_eq!(result, Some(7));
    }
}
