//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on a field of a larger state
//!
//! An application state is usually split into independent slices, each
//! owned by its own reducer. The slices are scoped onto the parent state and
//! then combined into the single reducer the store runs.
//!
//! # Example
//!
//! ```
//! use todosync_core::composition::{combine_reducers, scope_reducer, SharedReducer};
//! use todosync_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug)]
//! enum Action {
//!     Push(u32),
//!     Rename(String),
//! }
//!
//! #[derive(Default)]
//! struct AppState {
//!     values: Vec<u32>,
//!     name: String,
//! }
//!
//! #[derive(Clone)]
//! struct ValuesReducer;
//!
//! impl Reducer for ValuesReducer {
//!     type State = Vec<u32>;
//!     type Action = Action;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Vec<u32>, action: Action, _env: &()) -> SmallVec<[Effect<Action>; 4]> {
//!         if let Action::Push(value) = action {
//!             state.push(value);
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! #[derive(Clone)]
//! struct NameReducer;
//!
//! impl Reducer for NameReducer {
//!     type State = String;
//!     type Action = Action;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut String, action: Action, _env: &()) -> SmallVec<[Effect<Action>; 4]> {
//!         if let Action::Rename(name) = action {
//!             *state = name;
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! fn values(state: &mut AppState) -> &mut Vec<u32> {
//!     &mut state.values
//! }
//!
//! fn name(state: &mut AppState) -> &mut String {
//!     &mut state.name
//! }
//!
//! let values: SharedReducer<AppState, Action, ()> = Arc::new(scope_reducer(ValuesReducer, values));
//! let name: SharedReducer<AppState, Action, ()> = Arc::new(scope_reducer(NameReducer, name));
//! let app = combine_reducers(vec![values, name]);
//!
//! let mut state = AppState::default();
//! app.reduce(&mut state, Action::Push(7), &());
//! app.reduce(&mut state, Action::Rename("inbox".to_string()), &());
//! assert_eq!(state.values, vec![7]);
//! assert_eq!(state.name, "inbox");
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;
use std::sync::Arc;

/// Shared, thread-safe reducer trait object
pub type SharedReducer<S, A, E> = Arc<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in order on every action, and all effects are
/// collected and concatenated.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<SharedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E> {
    reducers: Vec<SharedReducer<S, A, E>>,
}

impl<S, A, E> Clone for CombinedReducer<S, A, E> {
    fn clone(&self) -> Self {
        Self {
            reducers: self.reducers.clone(),
        }
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects.into_iter().filter(|effect| !effect.is_none()));
        }

        all_effects
    }
}

/// Scopes a reducer to operate on a field of a larger state.
///
/// `focus` projects the parent state onto the child state the reducer owns;
/// the child is mutated in place.
pub fn scope_reducer<S, SubS, R>(reducer: R, focus: fn(&mut S) -> &mut SubS) -> ScopedReducer<S, SubS, R>
where
    R: Reducer<State = SubS>,
{
    ScopedReducer { reducer, focus }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, R> {
    reducer: R,
    focus: fn(&mut S) -> &mut SubS,
}

impl<S, SubS, R: Clone> Clone for ScopedReducer<S, SubS, R> {
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            focus: self.focus,
        }
    }
}

impl<S, SubS, R> Reducer for ScopedReducer<S, SubS, R>
where
    R: Reducer<State = SubS>,
{
    type State = S;
    type Action = R::Action;
    type Environment = R::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.reducer.reduce((self.focus)(state), action, env)
    }
}
