//! Do-notation macro for [`Effect`](super::Effect).
//!
//! The `effect!` macro turns a block of binds into nested `flat_map` calls,
//! so dependent lookups read top to bottom. `<=` is the bind operator since
//! Rust macros cannot match `<-`.
//!
//! ```text
//! effect! {
//!     pattern <= effect_expression;          // bind the success value
//!     let pattern = expression;              // pure let binding
//!     guard condition, else effect_expr;     // continue only if condition holds
//!     effect_expression                      // final expression: an Effect
//! }
//! ```
//!
//! Any domain error or fault in a bound effect short-circuits the rest of
//! the block, exactly like `flat_map`.

/// Do-notation for chaining dependent effects.
///
/// # Examples
///
/// ```rust
/// use futeither::effect;
/// use futeither::effect::{FutEither, Scheduler};
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let monad = FutEither::<String>::new(Scheduler::from_handle(runtime.handle().clone()));
/// let lookups = monad.clone();
///
/// let age_sum = effect! {
///     me <= monad.pure(("Juan", 35));
///     let (_, my_age) = me;
///     guard my_age >= 18, else lookups.raise_error("minors have no friends".to_string());
///     friend_age <= lookups.pure(28);
///     lookups.pure(my_age + friend_age)
/// };
/// assert_eq!(runtime.block_on(age_sum.run()), Ok(Ok(63)));
/// ```
#[macro_export]
macro_rules! effect {
    // Terminal case: single expression (must be an Effect)
    ($result:expr) => {
        $result
    };

    // Bind with identifier pattern: `identifier <= effect; rest`
    ($pattern:ident <= $effect:expr ; $($rest:tt)+) => {
        $effect.flat_map(move |$pattern| {
            $crate::effect!($($rest)+)
        })
    };

    // Bind with tuple pattern: `(pattern1, pattern2) <= effect; rest`
    (($($pattern:tt)*) <= $effect:expr ; $($rest:tt)+) => {
        $effect.flat_map(move |($($pattern)*)| {
            $crate::effect!($($rest)+)
        })
    };

    // Bind with wildcard pattern: `_ <= effect; rest`
    (_ <= $effect:expr ; $($rest:tt)+) => {
        $effect.flat_map(move |_| {
            $crate::effect!($($rest)+)
        })
    };

    // Guard: `guard condition, else failure_effect; rest`
    (guard $condition:expr , else $failure:expr ; $($rest:tt)+) => {
        if $condition {
            $crate::effect!($($rest)+)
        } else {
            $failure
        }
    };

    // Pure let binding with identifier: `let identifier = expr; rest`
    (let $pattern:ident = $expr:expr ; $($rest:tt)+) => {
        {
            let $pattern = $expr;
            $crate::effect!($($rest)+)
        }
    };

    // Pure let binding with tuple pattern: `let (a, b) = expr; rest`
    (let ($($pattern:tt)*) = $expr:expr ; $($rest:tt)+) => {
        {
            let ($($pattern)*) = $expr;
            $crate::effect!($($rest)+)
        }
    };

    // Pure let binding with type annotation: `let identifier: Type = expr; rest`
    (let $pattern:ident : $ty:ty = $expr:expr ; $($rest:tt)+) => {
        {
            let $pattern: $ty = $expr;
            $crate::effect!($($rest)+)
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::{AsyncTask, Fault, FutEither, Scheduler};

    fn monad() -> FutEither<String> {
        FutEither::new(Scheduler::current().unwrap())
    }

    #[tokio::test]
    async fn test_effect_macro_chains_binds() {
        let monad = monad();
        let inner = monad.clone();
        let result = effect! {
            x <= monad.pure(5);
            let doubled = x * 2;
            inner.pure(doubled + 1)
        };
        assert_eq!(result.await, Ok(Ok(11)));
    }

    #[tokio::test]
    async fn test_effect_macro_tuple_and_wildcard() {
        let monad = monad();
        let second = monad.clone();
        let third = monad.clone();
        let result = effect! {
            (a, b) <= monad.pure((10, 20));
            _ <= second.pure("ignored");
            third.pure(a + b)
        };
        assert_eq!(result.await, Ok(Ok(30)));
    }

    #[tokio::test]
    async fn test_effect_macro_guard_failure() {
        let monad = monad();
        let inner = monad.clone();
        let result = effect! {
            age <= monad.pure(12);
            guard age >= 18, else inner.raise_error("too young".to_string());
            inner.pure(age)
        };
        assert_eq!(result.await, Ok(Err("too young".to_string())));
    }

    #[tokio::test]
    async fn test_effect_macro_short_circuits_on_fault() {
        let monad = monad();
        let inner = monad.clone();
        let result = effect! {
            x <= monad.lift::<i32>(AsyncTask::failed(Fault::external("down")));
            inner.pure(x + 1)
        };
        assert_eq!(result.await, Err(Fault::external("down")));
    }
}
