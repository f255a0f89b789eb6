use dioxus::prelude::*;
use quiz_core::model::SessionSnapshot;

use crate::context::AppContext;

/// Latest session snapshot, refreshed whenever the quiz service publishes one.
pub fn use_session_snapshot() -> Signal<SessionSnapshot> {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();
    let snapshot = use_signal(|| quiz.snapshot());

    use_future(move || {
        let mut updates = quiz.subscribe();
        let mut snapshot = snapshot;
        async move {
            loop {
                let next = updates.borrow_and_update().clone();
                if *snapshot.peek() != next {
                    snapshot.set(next);
                }
                if updates.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    snapshot
}
