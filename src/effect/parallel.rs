//! Concurrent composition: `map2`, `map3`, `map4` and `sequence`.
//!
//! These combinators express *independent* work. Every parent is spawned on
//! its own scheduler as soon as the combined effect is built, so none waits
//! for another; only the combining step waits for all of them. The combined
//! effect itself runs on the receiver's scheduler (for `sequence`, the
//! `FutEither`'s).
//!
//! # Failure Priority
//!
//! Completion order is not deterministic, so the surfaced failure never
//! depends on it. After every parent has resolved, outcomes are inspected in
//! argument order (the receiver is index 0) and the first parent that did
//! not succeed decides the result, whether it failed with a domain error or
//! faulted. The remaining failures are ignored; their tasks still run to
//! completion because nothing is cancelled.

use super::{AsyncTask, Effect, Scheduler};

/// Unwraps a parent's success value, or returns its failure from the
/// enclosing async block.
macro_rules! settled {
    ($outcome:expr) => {
        match $outcome {
            Ok(Ok(value)) => value,
            Ok(Err(error)) => return Ok(Err(error)),
            Err(fault) => return Err(fault),
        }
    };
}

impl<E, A> Effect<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
{
    /// Combines two independent effects.
    ///
    /// Both effects start immediately and run concurrently, each on the
    /// scheduler it was built with. `function` is invoked at most once, and
    /// only when both succeed; otherwise the failure of the lowest-indexed
    /// failing parent is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futeither::effect::{AsyncTask, FutEither, Scheduler};
    ///
    /// let runtime = tokio::runtime::Runtime::new().unwrap();
    /// let monad = FutEither::<String>::new(Scheduler::from_handle(runtime.handle().clone()));
    ///
    /// let me = monad.lift(AsyncTask::successful(Ok(35)));
    /// let friend = monad.lift(AsyncTask::successful(Ok(28)));
    ///
    /// let sum = me.map2(friend, |a, b| a + b);
    /// assert_eq!(runtime.block_on(sum.run()), Ok(Ok(63)));
    /// ```
    pub fn map2<B, R, F>(self, second: Effect<E, B>, function: F) -> Effect<E, R>
    where
        B: Send + 'static,
        R: Send + 'static,
        F: FnOnce(A, B) -> R + Send + 'static,
    {
        let scheduler = self.scheduler().clone();
        let second = second.start();
        let first = self.start();

        Effect::from_parts(
            scheduler,
            AsyncTask::new(async move {
                let (first, second) = futures::join!(first, second);
                let first = settled!(first);
                let second = settled!(second);
                Ok(Ok(function(first, second)))
            }),
        )
    }

    /// Combines three independent effects. See [`map2`](Self::map2).
    pub fn map3<B, C, R, F>(
        self,
        second: Effect<E, B>,
        third: Effect<E, C>,
        function: F,
    ) -> Effect<E, R>
    where
        B: Send + 'static,
        C: Send + 'static,
        R: Send + 'static,
        F: FnOnce(A, B, C) -> R + Send + 'static,
    {
        let scheduler = self.scheduler().clone();
        let second = second.start();
        let third = third.start();
        let first = self.start();

        Effect::from_parts(
            scheduler,
            AsyncTask::new(async move {
                let (first, second, third) = futures::join!(first, second, third);
                let first = settled!(first);
                let second = settled!(second);
                let third = settled!(third);
                Ok(Ok(function(first, second, third)))
            }),
        )
    }

    /// Combines four independent effects. See [`map2`](Self::map2).
    pub fn map4<B, C, D, R, F>(
        self,
        second: Effect<E, B>,
        third: Effect<E, C>,
        fourth: Effect<E, D>,
        function: F,
    ) -> Effect<E, R>
    where
        B: Send + 'static,
        C: Send + 'static,
        D: Send + 'static,
        R: Send + 'static,
        F: FnOnce(A, B, C, D) -> R + Send + 'static,
    {
        let scheduler = self.scheduler().clone();
        let second = second.start();
        let third = third.start();
        let fourth = fourth.start();
        let first = self.start();

        Effect::from_parts(
            scheduler,
            AsyncTask::new(async move {
                let (first, second, third, fourth) =
                    futures::join!(first, second, third, fourth);
                let first = settled!(first);
                let second = settled!(second);
                let third = settled!(third);
                let fourth = settled!(fourth);
                Ok(Ok(function(first, second, third, fourth)))
            }),
        )
    }

    /// Pairs two independent effects into a tuple.
    pub fn zip<B>(self, other: Effect<E, B>) -> Effect<E, (A, B)>
    where
        B: Send + 'static,
    {
        self.map2(other, |first, second| (first, second))
    }
}

/// Starts every effect on its own scheduler and collects their values in
/// input order. The resulting effect runs on `scheduler`.
pub(crate) fn sequence_on<E, A, I>(scheduler: &Scheduler, effects: I) -> Effect<E, Vec<A>>
where
    E: Send + 'static,
    A: Send + 'static,
    I: IntoIterator<Item = Effect<E, A>>,
{
    let started: Vec<_> = effects
        .into_iter()
        .map(Effect::start)
        .collect();
    tracing::trace!(parents = started.len(), "sequencing effects");

    Effect::from_parts(
        scheduler.clone(),
        AsyncTask::new(async move {
            let outcomes = futures::future::join_all(started).await;
            let mut values = Vec::with_capacity(outcomes.len());
            for outcome in outcomes {
                values.push(settled!(outcome));
            }
            Ok(Ok(values))
        }),
    )
}

#[cfg(test)]
mod tests {
    use crate::effect::{AsyncTask, Effect, Fault, FutEither, Scheduler};
    use rstest::rstest;
    use std::time::Duration;

    fn monad() -> FutEither<String> {
        FutEither::new(Scheduler::current().unwrap())
    }

    fn delayed(
        monad: &FutEither<String>,
        delay_ms: u64,
        outcome: Result<i32, String>,
    ) -> Effect<String, i32> {
        monad.lift(AsyncTask::from_future(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            outcome
        }))
    }

    #[rstest]
    #[tokio::test]
    async fn test_zip_pairs_values() {
        let monad = monad();
        let effect = monad.pure(1).zip(monad.pure("one"));
        assert_eq!(effect.await, Ok(Ok((1, "one"))));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn test_map2_prefers_first_failure_even_when_it_finishes_last() {
        let monad = monad();
        let effect = delayed(&monad, 50, Err("first".to_string()))
            .map2(delayed(&monad, 0, Err("second".to_string())), |a, b| a + b);
        assert_eq!(effect.await, Ok(Err("first".to_string())));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn test_map3_fault_at_lower_index_beats_domain_error() {
        let monad = monad();
        let effect = monad.pure(1).map3(
            monad.lift::<i32>(AsyncTask::failed(Fault::external("offline"))),
            delayed(&monad, 0, Err("third".to_string())),
            |a, b, c| a + b + c,
        );
        assert_eq!(effect.await, Err(Fault::external("offline")));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn test_map4_domain_error_at_lower_index_beats_fault() {
        let monad = monad();
        let effect = monad.pure(1).map4(
            monad.raise_error::<i32>("second".to_string()),
            monad.lift::<i32>(AsyncTask::failed(Fault::external("offline"))),
            monad.pure(4),
            |a, b, c, d| a + b + c + d,
        );
        assert_eq!(effect.await, Ok(Err("second".to_string())));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn test_sequence_reports_lowest_index_failure() {
        let monad = monad();
        let effect = monad.sequence(vec![
            delayed(&monad, 5, Ok(1)),
            delayed(&monad, 40, Err("slow".to_string())),
            delayed(&monad, 1, Err("fast".to_string())),
        ]);
        assert_eq!(effect.await, Ok(Err("slow".to_string())));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn test_sequence_keeps_input_order() {
        let monad = monad();
        let effect = monad.sequence(vec![
            delayed(&monad, 30, Ok(1)),
            delayed(&monad, 10, Ok(2)),
            delayed(&monad, 20, Ok(3)),
        ]);
        assert_eq!(effect.await, Ok(Ok(vec![1, 2, 3])));
    }
}
