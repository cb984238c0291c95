//! Property-based tests for the Effect functor and monad laws.
//!
//! The laws are checked on the success path, and failure passthrough is
//! checked for both channels:
//! - Functor identity and composition
//! - Left identity, right identity and associativity
//! - `raise_error(e).flat_map(f) == raise_error(e)` without invoking `f`

use futeither::effect::{AsyncTask, Effect, Fault, FutEither, Scheduler};
use proptest::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::runtime::Runtime;

type Outcome<A> = Result<Result<A, String>, Fault>;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn monad(runtime: &Runtime) -> FutEither<String> {
    FutEither::new(Scheduler::from_handle(runtime.handle().clone()))
}

fn run<A: Send + 'static>(runtime: &Runtime, effect: Effect<String, A>) -> Outcome<A> {
    runtime.block_on(effect.run())
}

// =============================================================================
// Functor Laws
// =============================================================================

proptest! {
    /// Identity: m.map(|x| x) == m
    #[test]
    fn prop_effect_functor_identity(value: i32) {
        let runtime = runtime();
        let monad = monad(&runtime);

        let left = run(&runtime, monad.pure(value).map(|x| x));
        let right = run(&runtime, monad.pure(value));

        prop_assert_eq!(left, right);
    }

    /// Composition: m.map(f).map(g) == m.map(|x| g(f(x)))
    #[test]
    fn prop_effect_functor_composition(value: i32) {
        let function1 = |n: i32| n.wrapping_add(1);
        let function2 = |n: i32| n.wrapping_mul(2);
        let runtime = runtime();
        let monad = monad(&runtime);

        let left = run(&runtime, monad.pure(value).map(function1).map(function2));
        let right = run(&runtime, monad.pure(value).map(move |x| function2(function1(x))));

        prop_assert_eq!(left, right);
    }

    /// Domain errors pass through map unchanged.
    #[test]
    fn prop_effect_map_preserves_domain_error(message in "[a-z]{1,16}") {
        let runtime = runtime();
        let monad = monad(&runtime);

        let result = run(&runtime, monad.raise_error::<i32>(message.clone()).map(|x| x + 1));

        prop_assert_eq!(result, Ok(Err(message)));
    }

    /// Faults pass through map unchanged.
    #[test]
    fn prop_effect_map_preserves_fault(message in "[a-z]{1,16}") {
        let runtime = runtime();
        let monad = monad(&runtime);
        let fault = Fault::external(message);

        let result = run(
            &runtime,
            monad.lift::<i32>(AsyncTask::failed(fault.clone())).map(|x| x + 1),
        );

        prop_assert_eq!(result, Err(fault));
    }
}

// =============================================================================
// Monad Laws
// =============================================================================

proptest! {
    /// Left Identity: pure(a).flat_map(f) == f(a)
    #[test]
    fn prop_effect_monad_left_identity(value: i32) {
        let runtime = runtime();
        let monad = monad(&runtime);
        let inner = monad.clone();
        let function = move |n: i32| inner.pure(n.wrapping_mul(2));

        let left = run(&runtime, monad.pure(value).flat_map(function.clone()));
        let right = run(&runtime, function(value));

        prop_assert_eq!(left, right);
    }

    /// Right Identity: m.flat_map(pure) == m
    #[test]
    fn prop_effect_monad_right_identity(value: i32) {
        let runtime = runtime();
        let monad = monad(&runtime);
        let inner = monad.clone();

        let left = run(&runtime, monad.pure(value).flat_map(move |x| inner.pure(x)));
        let right = run(&runtime, monad.pure(value));

        prop_assert_eq!(left, right);
    }

    /// Associativity: m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))
    #[test]
    fn prop_effect_monad_associativity(value: i32) {
        let runtime = runtime();
        let monad = monad(&runtime);
        let first = monad.clone();
        let second = monad.clone();
        let function1 = move |n: i32| first.pure(n.wrapping_add(1));
        let function2 = move |n: i32| second.pure(n.wrapping_mul(2));

        let left = run(
            &runtime,
            monad
                .pure(value)
                .flat_map(function1.clone())
                .flat_map(function2.clone()),
        );
        let right = run(
            &runtime,
            monad
                .pure(value)
                .flat_map(move |x| function1(x).flat_map(function2)),
        );

        prop_assert_eq!(left, right);
    }

    /// raise_error(e).flat_map(f) == raise_error(e), and f is never invoked.
    #[test]
    fn prop_effect_raise_error_short_circuits_flat_map(message in "[a-z]{1,16}") {
        let runtime = runtime();
        let monad = monad(&runtime);
        let inner = monad.clone();
        let invoked = Arc::new(AtomicBool::new(false));
        let flag = invoked.clone();

        let result = run(
            &runtime,
            monad.raise_error::<i32>(message.clone()).flat_map(move |x| {
                flag.store(true, Ordering::SeqCst);
                inner.pure(x)
            }),
        );

        prop_assert_eq!(result, Ok(Err(message)));
        prop_assert!(!invoked.load(Ordering::SeqCst));
    }
}

// =============================================================================
// Applicative Consistency
// =============================================================================

proptest! {
    /// map2 agrees with the dependent flat_map formulation on success.
    #[test]
    fn prop_effect_map2_matches_flat_map(first: i32, second: i32) {
        let runtime = runtime();
        let monad = monad(&runtime);
        let inner = monad.clone();

        let concurrent = run(
            &runtime,
            monad.pure(first).map2(monad.pure(second), i32::wrapping_add),
        );
        let dependent = run(
            &runtime,
            monad
                .pure(first)
                .flat_map(move |a| inner.pure(second).map(move |b| a.wrapping_add(b))),
        );

        prop_assert_eq!(concurrent, dependent);
    }

    /// sequence preserves input order for any list of values.
    #[test]
    fn prop_effect_sequence_preserves_order(values in prop::collection::vec(any::<i32>(), 0..16)) {
        let runtime = runtime();
        let monad = monad(&runtime);

        let result = run(&runtime, monad.traverse(values.clone(), |value| monad.pure(value)));

        prop_assert_eq!(result, Ok(Ok(values)));
    }
}
