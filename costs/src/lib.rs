#![deny(missing_docs)]
//! Cost accounting shared by the nameveil crates.
//!
//! Operations return their value wrapped in a [`CostContext`] so callers can
//! meter storage traffic and Merkle hashing without threading a separate
//! accumulator argument through every call.

use std::ops::{Add, AddAssign};

/// Resources consumed by one operation (approximately).
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct OperationCost {
    /// How many store lookups were performed.
    pub seek_count: u16,
    /// How many bytes were handed to the backing store for writing.
    pub storage_written_bytes: u32,
    /// How many bytes were loaded from the backing store.
    pub storage_loaded_bytes: u32,
    /// How many two-child Merkle node hashes were computed.
    pub hash_node_calls: u32,
}

impl OperationCost {
    /// `OperationCost` with only `seek_count` set.
    pub fn with_seek_count(seek_count: u16) -> Self {
        OperationCost {
            seek_count,
            ..Default::default()
        }
    }

    /// `OperationCost` with only `storage_written_bytes` set.
    pub fn with_storage_written_bytes(storage_written_bytes: u32) -> Self {
        OperationCost {
            storage_written_bytes,
            ..Default::default()
        }
    }

    /// `OperationCost` with only `storage_loaded_bytes` set.
    pub fn with_storage_loaded_bytes(storage_loaded_bytes: u32) -> Self {
        OperationCost {
            storage_loaded_bytes,
            ..Default::default()
        }
    }

    /// `OperationCost` with only `hash_node_calls` set.
    pub fn with_hash_node_calls(hash_node_calls: u32) -> Self {
        OperationCost {
            hash_node_calls,
            ..Default::default()
        }
    }
}

impl Add for OperationCost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        OperationCost {
            seek_count: self.seek_count + rhs.seek_count,
            storage_written_bytes: self.storage_written_bytes + rhs.storage_written_bytes,
            storage_loaded_bytes: self.storage_loaded_bytes + rhs.storage_loaded_bytes,
            hash_node_calls: self.hash_node_calls + rhs.hash_node_calls,
        }
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.seek_count += rhs.seek_count;
        self.storage_written_bytes += rhs.storage_written_bytes;
        self.storage_loaded_bytes += rhs.storage_loaded_bytes;
        self.hash_node_calls += rhs.hash_node_calls;
    }
}

/// An operation's return value together with its cost.
#[derive(Debug, Eq, PartialEq)]
pub struct CostContext<T> {
    /// Wrapped operation's return value.
    pub value: T,
    /// Cost of the operation.
    pub cost: OperationCost,
}

impl<T> CostContext<T> {
    /// Take the wrapped value out, adding its cost to `acc_cost`.
    pub fn unwrap_add_cost(self, acc_cost: &mut OperationCost) -> T {
        *acc_cost += self.cost;
        self.value
    }

    /// Take the wrapped value out, dropping cost data.
    pub fn unwrap(self) -> T {
        self.value
    }

    /// Borrow the cost data.
    pub fn cost(&self) -> &OperationCost {
        &self.cost
    }

    /// Borrow the wrapped value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Apply a function to the wrapped value, keeping the cost unchanged.
    pub fn map<B>(self, f: impl FnOnce(T) -> B) -> CostContext<B> {
        let cost = self.cost;
        let value = f(self.value);
        CostContext { value, cost }
    }

    /// Apply a cost-returning function to the wrapped value, adding costs.
    pub fn flat_map<B>(self, f: impl FnOnce(T) -> CostContext<B>) -> CostContext<B> {
        let mut cost = self.cost;
        let value = f(self.value).unwrap_add_cost(&mut cost);
        CostContext { value, cost }
    }

    /// Add previously accumulated cost.
    pub fn add_cost(mut self, cost: OperationCost) -> Self {
        self.cost += cost;
        self
    }
}

/// Type alias for `Result` wrapped into `CostContext`.
pub type CostResult<T, E> = CostContext<Result<T, E>>;

impl<T, E> CostResult<T, E> {
    /// Apply a function to the `Ok` value, keeping the cost unchanged.
    pub fn map_ok<B>(self, f: impl FnOnce(T) -> B) -> CostResult<B, E> {
        self.map(|result| result.map(f))
    }

    /// Apply a function to the `Err` value, keeping the cost unchanged.
    pub fn map_err<B>(self, f: impl FnOnce(E) -> B) -> CostResult<T, B> {
        self.map(|result| result.map_err(f))
    }

    /// Apply a cost-returning function to the `Ok` value, adding costs.
    pub fn flat_map_ok<B>(self, f: impl FnOnce(T) -> CostResult<B, E>) -> CostResult<B, E> {
        let mut cost = self.cost;
        let result = match self.value {
            Ok(x) => f(x).unwrap_add_cost(&mut cost),
            Err(e) => Err(e),
        };
        CostContext {
            value: result,
            cost,
        }
    }
}

impl<T, E> CostResult<Result<T, E>, E> {
    /// Flatten nested errors inside `CostContext`.
    pub fn flatten(self) -> CostResult<T, E> {
        self.map(|value| match value {
            Err(e) => Err(e),
            Ok(Err(e)) => Err(e),
            Ok(Ok(v)) => Ok(v),
        })
    }
}

/// Extension trait to wrap any value into a [`CostContext`].
pub trait CostsExt {
    /// Wrap a value into a `CostContext` with the provided cost.
    fn wrap_with_cost(self, cost: OperationCost) -> CostContext<Self>
    where
        Self: Sized,
    {
        CostContext { value: self, cost }
    }

    /// Wrap a value into a `CostContext` with a cost computed from the value.
    fn wrap_fn_cost(self, f: impl FnOnce(&Self) -> OperationCost) -> CostContext<Self>
    where
        Self: Sized,
    {
        CostContext {
            cost: f(&self),
            value: self,
        }
    }
}

impl<T> CostsExt for T {}

/// `?`-like early return for `CostResult` expressions. On error the
/// already-accumulated cost in `$cost` is attached to the returned error; on
/// success the inner cost is added to `$cost` and the `Ok` value yielded.
#[macro_export]
macro_rules! cost_return_on_error {
    ( &mut $cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result_with_cost = { $($body)+ };
            let result = result_with_cost.unwrap_add_cost(&mut $cost);
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}

/// Like [`cost_return_on_error!`] but for plain `Result` expressions that
/// carry no cost of their own; only previously accumulated cost is attached
/// on early return.
#[macro_export]
macro_rules! cost_return_on_error_no_add {
    ( &$cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result = { $($body)+ };
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}
