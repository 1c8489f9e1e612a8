//! Ordering and capacity invariants over arbitrary event sequences.
//! 任意事件序列下的排序与容量不变量。

use std::collections::HashSet;

use cs_core::history::{
    is_favorites_first, HistoryAction, HistoryEvent, HistoryState, HistoryStateMachine,
};
use cs_core::{ClipboardContent, ClipboardItem, ItemId, TimestampMs};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Add { id: u8, ts: i64, favorite: bool },
    Toggle { id: u8 },
    RemoveAt { indices: Vec<usize> },
    Remove { id: u8 },
    Capacity { capacity: usize },
    Load { items: Vec<(u8, i64, bool)> },
    Clear,
}

fn item(id: u8, ts: i64, favorite: bool) -> ClipboardItem {
    ClipboardItem::restore(
        ItemId::from(format!("i{id}")),
        TimestampMs::from_epoch_millis(ts),
        ClipboardContent::Text(format!("text {id}")),
        favorite,
    )
}

impl Step {
    fn into_event(self) -> HistoryEvent {
        match self {
            Step::Add { id, ts, favorite } => HistoryEvent::ItemAdded {
                item: item(id, ts, favorite),
            },
            Step::Toggle { id } => HistoryEvent::FavoriteToggled {
                id: ItemId::from(format!("i{id}")),
            },
            Step::RemoveAt { indices } => HistoryEvent::ItemsRemovedAt { indices },
            Step::Remove { id } => HistoryEvent::ItemRemoved {
                id: ItemId::from(format!("i{id}")),
            },
            Step::Capacity { capacity } => HistoryEvent::CapacityChanged { capacity },
            Step::Load { items } => HistoryEvent::ItemsLoaded {
                items: items
                    .into_iter()
                    .map(|(id, ts, favorite)| item(id, ts, favorite))
                    .collect(),
            },
            Step::Clear => HistoryEvent::AllCleared,
        }
    }
}

// A small id pool so toggles and removals usually hit live items.
fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0u8..12, 0i64..50, any::<bool>())
            .prop_map(|(id, ts, favorite)| Step::Add { id, ts, favorite }),
        2 => (0u8..12).prop_map(|id| Step::Toggle { id }),
        1 => prop::collection::vec(0usize..15, 0..4)
            .prop_map(|indices| Step::RemoveAt { indices }),
        1 => (0u8..12).prop_map(|id| Step::Remove { id }),
        1 => (0usize..8).prop_map(|capacity| Step::Capacity { capacity }),
        1 => prop::collection::vec((0u8..12, 0i64..50, any::<bool>()), 0..15)
            .prop_map(|items| Step::Load { items }),
        1 => Just(Step::Clear),
    ]
}

proptest! {
    #[test]
    fn prop_history_stays_bounded_and_ordered(
        steps in prop::collection::vec(step(), 1..150),
    ) {
        let mut state = HistoryState::with_capacity(5);
        for step in steps {
            let (next, actions) = HistoryStateMachine::transition(state, step.into_event());
            state = next;

            prop_assert!(state.items.len() <= state.capacity);
            prop_assert!(is_favorites_first(&state.items));

            let mut ids = HashSet::new();
            prop_assert!(state.items.iter().all(|i| ids.insert(i.id().clone())));

            for action in &actions {
                if let HistoryAction::PersistSnapshot { items } = action {
                    prop_assert_eq!(items, &state.items);
                }
            }
        }
    }

    #[test]
    fn prop_toggle_of_unknown_id_is_inert(
        items in prop::collection::vec((0u8..6, 0i64..50, any::<bool>()), 0..6),
    ) {
        let state = HistoryState::with_capacity(20);
        let loaded = items.into_iter().map(|(id, ts, fav)| item(id, ts, fav)).collect();
        let (state, _) = HistoryStateMachine::transition(state, HistoryEvent::ItemsLoaded { items: loaded });

        let (next, actions) = HistoryStateMachine::transition(
            state.clone(),
            HistoryEvent::FavoriteToggled { id: ItemId::from("missing") },
        );
        prop_assert_eq!(next, state);
        prop_assert!(actions.is_empty());
    }
}
