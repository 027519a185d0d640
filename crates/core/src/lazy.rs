//! Deferred, memoized computations with explicit failure propagation.
//!
//! A [`LazyResult`] holds a plan that runs at most once, the first time the
//! outcome is requested. Whatever the plan produces, success or failure, is
//! cached in the same slot and served on every later access.
//!
//! Chaining with [`then`](LazyResult::then), [`catch`](LazyResult::catch) and
//! [`expect`](LazyResult::expect) consumes the predecessor and appends a step
//! to its pending plan, or starts a new plan from its cached outcome. A plan
//! is a root computation followed by a flat list of steps, so evaluating a
//! chain walks it in a loop and its depth is not bounded by the stack.

use std::any::Any;
use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

use tracing::{debug, trace};

use crate::error::ConstructionError;
use crate::failure::Failure;
use crate::panic::Panic;
use crate::result::Outcome;

/// A boxed computation whose `Err` is an ordinary failure.
pub type Thunk<X, E> = Box<dyn FnOnce() -> Result<X, E> + Send>;

/// A boxed computation that may also raise a [`Panic`].
pub type Resolver<X, E> = Box<dyn FnOnce() -> Outcome<X, E> + Send>;

/// Statement of the panic served when a resolver unwound mid-evaluation.
const INCOMPLETE_RESOLUTION: &str = "lazy result resolver did not complete";

/// Statement of the panic served when a step hands over a value of the wrong type.
const VALUE_TYPE_MISMATCH: &str = "lazy result step produced a value of an unexpected type";

type Erased = Box<dyn Any + Send>;
type ErasedOutcome<E> = Result<Erased, Failure<E>>;
type Step<E> = Box<dyn FnOnce(ErasedOutcome<E>) -> ErasedOutcome<E> + Send>;

fn erase<X: Send + 'static>(value: X) -> Erased {
    Box::new(value)
}

fn restore<X: 'static, E>(value: Erased) -> Outcome<X, E> {
    value
        .downcast::<X>()
        .map(|value| *value)
        .map_err(|_| Failure::Panic(Panic::new(VALUE_TYPE_MISMATCH)))
}

/// Pending work of a chain: a root computation and the steps applied to it.
struct Plan<E> {
    root: Box<dyn FnOnce() -> ErasedOutcome<E> + Send>,
    steps: Vec<Step<E>>,
}

impl<E: Send + 'static> Plan<E> {
    fn new<F>(root: F) -> Self
    where
        F: FnOnce() -> ErasedOutcome<E> + Send + 'static,
    {
        Self {
            root: Box::new(root),
            steps: Vec::new(),
        }
    }

    fn incomplete() -> Self {
        Self::new(|| Err(Failure::Panic(Panic::new(INCOMPLETE_RESOLUTION))))
    }

    fn then(mut self, step: Step<E>) -> Self {
        self.steps.push(step);
        self
    }
}

impl<E> Plan<E> {
    fn run(self) -> ErasedOutcome<E> {
        let Self { root, steps } = self;
        trace!(steps = steps.len(), "Evaluating lazy result");
        steps.into_iter().fold(root(), |outcome, step| step(outcome))
    }
}

/// Observable evaluation state of a [`LazyResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The resolver has not run yet.
    Uncomputed,
    /// The resolver ran and produced a value.
    Success,
    /// The resolver ran and failed.
    Failure,
}

/// A computation that runs on first access and caches its outcome.
pub struct LazyResult<X, E> {
    plan: Mutex<Option<Plan<E>>>,
    outcome: OnceLock<Outcome<X, E>>,
}

impl<X, E> LazyResult<X, E> {
    /// Current state, without forcing evaluation.
    #[must_use]
    pub fn state(&self) -> State {
        match self.outcome.get() {
            None => State::Uncomputed,
            Some(Ok(_)) => State::Success,
            Some(Err(_)) => State::Failure,
        }
    }

    #[must_use]
    pub fn is_evaluated(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// Borrow the outcome, evaluating the plan if it has not run yet.
    ///
    /// # Errors
    ///
    /// Returns the cached failure if the computation failed.
    pub fn get(&self) -> Result<&X, &Failure<E>>
    where
        X: 'static,
    {
        self.resolve().as_ref()
    }

    /// The success value, or the failure as `Err`.
    ///
    /// The plan runs on the first call only; later calls return clones of
    /// the cached outcome, failures included.
    ///
    /// # Errors
    ///
    /// Returns the failure produced by the computation, whether it was
    /// returned or raised as a [`Panic`].
    pub fn unwrap(&self) -> Outcome<X, E>
    where
        X: Clone + 'static,
        E: Clone,
    {
        self.resolve().clone()
    }

    /// The success value, or `fallback()` if the computation failed.
    ///
    /// `fallback` runs only on failure, [`Panic`]s included.
    pub fn else_unwrap<F>(&self, fallback: F) -> X
    where
        X: Clone + 'static,
        F: FnOnce() -> X,
    {
        match self.get() {
            Ok(value) => value.clone(),
            Err(failure) => {
                debug!(panic = failure.is_panic(), "Lazy result failed, using fallback");
                fallback()
            }
        }
    }

    /// Consume the container, returning its outcome.
    ///
    /// # Errors
    ///
    /// Returns the failure produced by the computation.
    pub fn into_result(self) -> Outcome<X, E>
    where
        X: 'static,
    {
        self.resolve();
        self.outcome
            .into_inner()
            .unwrap_or_else(|| Err(Failure::Panic(Panic::new(INCOMPLETE_RESOLUTION))))
    }

    fn resolve(&self) -> &Outcome<X, E>
    where
        X: 'static,
    {
        if let Some(outcome) = self.outcome.get() {
            trace!("Serving cached lazy result");
            return outcome;
        }

        self.outcome.get_or_init(|| {
            let plan = self
                .plan
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            match plan {
                Some(plan) => plan.run().and_then(restore),
                // The plan was taken by an evaluation that unwound.
                None => Err(Failure::Panic(Panic::new(INCOMPLETE_RESOLUTION))),
            }
        })
    }
}

impl<X, E> LazyResult<X, E>
where
    X: Send + 'static,
    E: Send + 'static,
{
    fn from_plan(plan: Plan<E>) -> Self {
        Self {
            plan: Mutex::new(Some(plan)),
            outcome: OnceLock::new(),
        }
    }

    /// Wrap a computation that may itself raise a [`Panic`].
    #[must_use]
    pub fn from_fn<F>(resolver: F) -> Self
    where
        F: FnOnce() -> Outcome<X, E> + Send + 'static,
    {
        Self::from_plan(Plan::new(move || resolver().map(erase)))
    }

    /// Wrap a computation; an `Err` it returns is an ordinary failure.
    #[must_use]
    pub fn of<F>(computation: F) -> Self
    where
        F: FnOnce() -> Result<X, E> + Send + 'static,
    {
        Self::from_fn(move || computation().map_err(Failure::Error))
    }

    /// Wrap a computation together with the arguments it will be called with.
    ///
    /// The arguments are bound now; the call happens on first access.
    #[must_use]
    pub fn with_args<A, F>(computation: F, args: A) -> Self
    where
        A: Send + 'static,
        F: FnOnce(A) -> Result<X, E> + Send + 'static,
    {
        Self::of(move || computation(args))
    }

    /// Build from a type-erased candidate, checking eagerly that it is callable.
    ///
    /// The candidate must be a boxed [`Thunk`] or [`Resolver`] for exactly
    /// these `X` and `E`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::NotInvocable`] for anything else.
    pub fn of_any(candidate: Box<dyn Any + Send>) -> Result<Self, ConstructionError> {
        candidate
            .downcast::<Thunk<X, E>>()
            .map(|thunk| Self::of(*thunk))
            .or_else(|candidate| {
                candidate
                    .downcast::<Resolver<X, E>>()
                    .map(|resolver| Self::from_fn(*resolver))
            })
            .map_err(|_| ConstructionError::not_invocable(std::any::type_name::<Thunk<X, E>>()))
    }

    /// A lazy result that resolves to `value`.
    #[must_use]
    pub fn ok(value: X) -> Self {
        Self::from_fn(move || Ok(value))
    }

    /// A lazy result that resolves to the ordinary failure `error`.
    #[must_use]
    pub fn err(error: E) -> Self {
        Self::from_fn(move || Err(Failure::Error(error)))
    }

    /// Hand this link's pending work, or its cached outcome, to a successor.
    fn extend<V>(self, step: Step<E>) -> LazyResult<V, E>
    where
        V: Send + 'static,
    {
        let Self { plan, outcome } = self;
        let plan = match outcome.into_inner() {
            Some(cached) => {
                let cached = cached.map(erase);
                Plan::new(move || cached)
            }
            None => plan
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner)
                .unwrap_or_else(Plan::incomplete),
        };
        LazyResult::from_plan(plan.then(step))
    }

    /// Lazily map the success value.
    ///
    /// `mapper` runs when the new link is evaluated, and only if this one
    /// succeeded. Failures pass through unchanged.
    #[must_use]
    pub fn then<V, F>(self, mapper: F) -> LazyResult<V, E>
    where
        V: Send + 'static,
        F: FnOnce(X) -> V + Send + 'static,
    {
        self.extend(Box::new(move |outcome: ErasedOutcome<E>| {
            outcome.and_then(restore::<X, E>).map(|value| erase(mapper(value)))
        }))
    }

    /// Lazily map the success value with a mapper that may fail.
    #[must_use]
    pub fn try_then<V, F>(self, mapper: F) -> LazyResult<V, E>
    where
        V: Send + 'static,
        F: FnOnce(X) -> Result<V, E> + Send + 'static,
    {
        self.extend(Box::new(move |outcome: ErasedOutcome<E>| {
            outcome
                .and_then(restore::<X, E>)
                .and_then(|value| mapper(value).map(erase).map_err(Failure::Error))
        }))
    }

    /// Lazily recover from a failure.
    ///
    /// `handler` runs at most once, only if this link failed, and receives
    /// the failure, [`Panic`]s included. Its return value becomes the new
    /// success value.
    #[must_use]
    pub fn catch<F>(self, handler: F) -> Self
    where
        F: FnOnce(Failure<E>) -> X + Send + 'static,
    {
        self.extend(Box::new(move |outcome: ErasedOutcome<E>| match outcome {
            Ok(value) => Ok(value),
            Err(failure) => {
                debug!(panic = failure.is_panic(), "Recovering lazy result");
                Ok(erase(handler(failure)))
            }
        }))
    }

    /// Lazily upgrade any ordinary failure to a [`Panic`].
    ///
    /// An existing panic is re-raised unchanged, so in a chain of expectations
    /// the first broken one names the failure.
    #[must_use]
    pub fn expect(self, statement: impl Into<String>) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let statement = statement.into();
        self.extend(Box::new(move |outcome: ErasedOutcome<E>| {
            outcome.map_err(|failure| match failure {
                Failure::Panic(panic) => Failure::Panic(panic),
                Failure::Error(error) => {
                    debug!(statement = %statement, "Expectation broken, raising panic");
                    Failure::Panic(Panic::new(statement).with_cause(error))
                }
            })
        }))
    }
}

impl<X: fmt::Debug, E: fmt::Debug> fmt::Debug for LazyResult<X, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome.get() {
            Some(outcome) => f.debug_tuple("LazyResult").field(outcome).finish(),
            None => f.write_str("LazyResult(<uncomputed>)"),
        }
    }
}
