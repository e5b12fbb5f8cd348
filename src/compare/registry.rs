//! The comparison registry.
//!
//! [`ComparisonRegistry`] maps pairs of operand types to equality and
//! three-way ordering functions. Lookups prefer an exact match on the runtime
//! types of both operands and fall back to the first registered key (in
//! registration order) that accepts the operand, which is how family keys such
//! as [`SEQUENCE`](super::SEQUENCE) act as a common supertype.
//!
//! # Examples
//!
//! ```rust
//! use verity::compare::ComparisonRegistry;
//! use verity::Comparison;
//!
//! let registry = ComparisonRegistry::with_defaults();
//!
//! assert!(registry.are_equal(&5_u8, &5_i32));
//! assert!(registry.are_equal(&vec![1, 2, 3], &vec![1, 2, 3]));
//! assert_eq!(registry.compare(&None::<i32>, &1).ok(), Some(Comparison::LessThan));
//! assert_eq!(registry.is_between(&1, &5, &10).ok(), Some(true));
//! ```

use std::any::TypeId;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{TypeKey, UnsupportedComparison, defaults};
use crate::Comparison;
use crate::value::{Value, is_same_instance, type_id_of};

/// A type-erased equality function.
///
/// The registry is passed along so that structural functions can compare
/// their elements through the same registry.
pub type EqualityFn =
    Arc<dyn Fn(&dyn Value, &dyn Value, &ComparisonRegistry) -> bool + Send + Sync>;

/// A type-erased ordering function. `None` declines the pair.
pub type OrderingFn =
    Arc<dyn Fn(&dyn Value, &dyn Value, &ComparisonRegistry) -> Option<Comparison> + Send + Sync>;

type RegistrationId = u64;

/// Which default function tables a new registry is populated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RegistryOptions {
    /// Install numeric, text, sequence, tuple, and error equality functions.
    pub equality_defaults: bool,
    /// Install numeric and text ordering functions.
    pub ordering_defaults: bool,
}

impl RegistryOptions {
    /// Options that install nothing.
    pub const fn empty() -> Self {
        Self {
            equality_defaults: false,
            ordering_defaults: false,
        }
    }
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            equality_defaults: true,
            ordering_defaults: true,
        }
    }
}

// =============================================================================
// Internal tables
// =============================================================================

/// Registrations for one exact slot. The last entry is the active one.
struct Entries<F> {
    stack: Vec<(RegistrationId, F)>,
}

impl<F: Clone> Entries<F> {
    const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    fn active(&self) -> Option<F> {
        self.stack.last().map(|(_, function)| function.clone())
    }

    fn is_live(&self) -> bool {
        !self.stack.is_empty()
    }

    fn push(&mut self, id: RegistrationId, function: F) {
        self.stack.push((id, function));
    }

    fn remove(&mut self, id: RegistrationId) -> bool {
        let before = self.stack.len();
        self.stack.retain(|(entry_id, _)| *entry_id != id);
        self.stack.len() != before
    }
}

fn position_of<T>(
    items: &[T],
    exact: &FxHashMap<TypeId, usize>,
    key: TypeKey,
    key_of: impl Fn(&T) -> TypeKey,
) -> Option<usize> {
    match key.exact_id() {
        Some(type_id) => exact.get(&type_id).copied(),
        None => items.iter().position(|item| key_of(item) == key),
    }
}

/// All equality functions sharing one left-hand key.
struct EqualityRow {
    left: TypeKey,
    columns: Vec<(TypeKey, Entries<EqualityFn>)>,
    exact: FxHashMap<TypeId, usize>,
}

impl EqualityRow {
    fn new(left: TypeKey) -> Self {
        Self {
            left,
            columns: Vec::new(),
            exact: FxHashMap::default(),
        }
    }

    fn is_live(&self) -> bool {
        self.columns.iter().any(|(_, entries)| entries.is_live())
    }

    fn column(&self, right: TypeKey) -> Option<&Entries<EqualityFn>> {
        position_of(&self.columns, &self.exact, right, |(key, _)| *key)
            .and_then(|index| self.columns.get(index))
            .map(|(_, entries)| entries)
    }

    fn column_mut(&mut self, right: TypeKey) -> &mut Entries<EqualityFn> {
        let index = match position_of(&self.columns, &self.exact, right, |(key, _)| *key) {
            Some(index) => index,
            None => {
                let index = self.columns.len();
                self.columns.push((right, Entries::new()));
                if let Some(type_id) = right.exact_id() {
                    self.exact.insert(type_id, index);
                }
                index
            }
        };
        &mut self.columns[index].1
    }

    fn resolve(&self, rhs: &dyn Value) -> Option<EqualityFn> {
        let exact = self
            .exact
            .get(&type_id_of(rhs))
            .and_then(|&index| self.columns.get(index))
            .and_then(|(_, entries)| entries.active());
        exact.or_else(|| {
            self.columns
                .iter()
                .filter(|(_, entries)| entries.is_live())
                .find(|(key, _)| key.accepts(rhs))
                .and_then(|(_, entries)| entries.active())
        })
    }
}

/// All ordering functions for one exact pair of keys.
struct OrderingSlot {
    left: TypeKey,
    right: TypeKey,
    entries: Entries<OrderingFn>,
}

#[derive(Default)]
struct RegistryState {
    next_id: RegistrationId,
    equality: Vec<EqualityRow>,
    equality_exact: FxHashMap<TypeId, usize>,
    ordering: Vec<OrderingSlot>,
    ordering_exact: FxHashMap<(TypeId, TypeId), usize>,
}

impl RegistryState {
    const fn allocate_id(&mut self) -> RegistrationId {
        self.next_id += 1;
        self.next_id
    }

    fn equality_row(&self, left: TypeKey) -> Option<&EqualityRow> {
        position_of(&self.equality, &self.equality_exact, left, |row| row.left)
            .and_then(|index| self.equality.get(index))
    }

    fn equality_row_mut(&mut self, left: TypeKey) -> &mut EqualityRow {
        let index = match position_of(&self.equality, &self.equality_exact, left, |row| row.left) {
            Some(index) => index,
            None => {
                let index = self.equality.len();
                self.equality.push(EqualityRow::new(left));
                if let Some(type_id) = left.exact_id() {
                    self.equality_exact.insert(type_id, index);
                }
                index
            }
        };
        &mut self.equality[index]
    }

    fn ordering_position(&self, left: TypeKey, right: TypeKey) -> Option<usize> {
        match (left.exact_id(), right.exact_id()) {
            (Some(left_id), Some(right_id)) => self.ordering_exact.get(&(left_id, right_id)).copied(),
            _ => self
                .ordering
                .iter()
                .position(|slot| slot.left == left && slot.right == right),
        }
    }

    fn ordering_slot_mut(&mut self, left: TypeKey, right: TypeKey) -> &mut OrderingSlot {
        let index = match self.ordering_position(left, right) {
            Some(index) => index,
            None => {
                let index = self.ordering.len();
                self.ordering.push(OrderingSlot {
                    left,
                    right,
                    entries: Entries::new(),
                });
                if let (Some(left_id), Some(right_id)) = (left.exact_id(), right.exact_id()) {
                    self.ordering_exact.insert((left_id, right_id), index);
                }
                index
            }
        };
        &mut self.ordering[index]
    }

    fn remove(&mut self, table: Table, left: TypeKey, right: TypeKey, id: RegistrationId) -> bool {
        match table {
            Table::Equality => {
                let Some(index) =
                    position_of(&self.equality, &self.equality_exact, left, |row| row.left)
                else {
                    return false;
                };
                let row = &mut self.equality[index];
                match position_of(&row.columns, &row.exact, right, |(key, _)| *key) {
                    Some(column) => row.columns[column].1.remove(id),
                    None => false,
                }
            }
            Table::Ordering => match self.ordering_position(left, right) {
                Some(index) => self.ordering[index].entries.remove(id),
                None => false,
            },
        }
    }

    /// Exact left row, else the first live row accepting `lhs`; then the
    /// same two steps for the right-hand column within that row.
    fn resolve_equality(&self, lhs: &dyn Value, rhs: &dyn Value) -> Option<EqualityFn> {
        let exact_row = self
            .equality_exact
            .get(&type_id_of(lhs))
            .and_then(|&index| self.equality.get(index))
            .filter(|row| row.is_live());
        let row = exact_row.or_else(|| {
            self.equality
                .iter()
                .filter(|row| row.is_live())
                .find(|row| row.left.accepts(lhs))
        })?;
        row.resolve(rhs)
    }

    fn resolve_ordering(&self, lhs: &dyn Value, rhs: &dyn Value) -> Option<OrderingFn> {
        let exact = self
            .ordering_exact
            .get(&(type_id_of(lhs), type_id_of(rhs)))
            .and_then(|&index| self.ordering.get(index))
            .and_then(|slot| slot.entries.active());
        exact.or_else(|| {
            self.ordering
                .iter()
                .filter(|slot| slot.entries.is_live())
                .find(|slot| slot.left.accepts(lhs) && slot.right.accepts(rhs))
                .and_then(|slot| slot.entries.active())
        })
    }

    fn equality_count(&self) -> usize {
        self.equality
            .iter()
            .flat_map(|row| &row.columns)
            .filter(|(_, entries)| entries.is_live())
            .count()
    }

    fn ordering_count(&self) -> usize {
        self.ordering
            .iter()
            .filter(|slot| slot.entries.is_live())
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Table {
    Equality,
    Ordering,
}

// =============================================================================
// Registration
// =============================================================================

/// Revocation token returned by every `register_*` call.
///
/// Dropping the token (or calling [`Registration::revoke`]) removes the
/// registration. If an earlier registration for the same pair is still live
/// it becomes active again; otherwise the pair reverts to the fallback
/// lookup. [`Registration::persist`] keeps the registration for the lifetime
/// of the registry.
#[must_use = "dropping a Registration revokes it; call `persist` to keep it"]
pub struct Registration {
    state: Weak<RwLock<RegistryState>>,
    id: RegistrationId,
    table: Table,
    left: TypeKey,
    right: TypeKey,
    armed: bool,
}

impl Registration {
    /// Removes the registration. Returns `false` if it was already gone,
    /// for example because the registry has been dropped.
    pub fn revoke(mut self) -> bool {
        self.release()
    }

    /// Keeps the registration for as long as the registry lives.
    pub fn persist(mut self) {
        self.armed = false;
    }

    /// The left-hand key this registration applies to.
    pub const fn left(&self) -> TypeKey {
        self.left
    }

    /// The right-hand key this registration applies to.
    pub const fn right(&self) -> TypeKey {
        self.right
    }

    fn release(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        self.armed = false;
        let Some(state) = self.state.upgrade() else {
            return false;
        };
        let removed = state
            .write()
            .remove(self.table, self.left, self.right, self.id);
        tracing::debug!(
            table = ?self.table,
            left = self.left.name(),
            right = self.right.name(),
            removed,
            "revoked comparison function"
        );
        removed
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Registration")
            .field("table", &self.table)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("armed", &self.armed)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// ComparisonRegistry
// =============================================================================

/// Runtime-extensible equality and ordering dispatch on pairs of types.
///
/// The registry is internally synchronized and can be shared through an
/// `Arc`. Registered functions always run without any internal lock held, so
/// they may call back into the registry.
pub struct ComparisonRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl ComparisonRegistry {
    /// Creates a registry with no registered functions.
    ///
    /// Lookups on an empty registry still apply the identity, null, and
    /// natural fallbacks.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(RegistryState::default())),
        }
    }

    /// Creates a registry populated with every default function.
    pub fn with_defaults() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    /// Creates a registry populated according to `options`.
    pub fn with_options(options: RegistryOptions) -> Self {
        let registry = Self::new();
        defaults::install(&registry, options);
        tracing::debug!(
            equality_functions = registry.equality_count(),
            ordering_functions = registry.ordering_count(),
            "created comparison registry"
        );
        registry
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers an equality function for exactly the pair `(T, U)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use verity::compare::ComparisonRegistry;
    ///
    /// let registry = ComparisonRegistry::new();
    /// assert!(!registry.are_equal(&"1", &1));
    ///
    /// let registration = registry.register_equality(|text: &&'static str, number: &i32| {
    ///     text.parse::<i32>().is_ok_and(|parsed| parsed == *number)
    /// });
    /// assert!(registry.are_equal(&"1", &1));
    ///
    /// registration.revoke();
    /// assert!(!registry.are_equal(&"1", &1));
    /// ```
    pub fn register_equality<T, U, F>(&self, function: F) -> Registration
    where
        T: Value,
        U: Value,
        F: Fn(&T, &U) -> bool + Send + Sync + 'static,
    {
        let registration = self.insert_equality(
            TypeKey::of::<T>(),
            TypeKey::of::<U>(),
            typed_equality(function),
        );
        tracing::debug!(
            left = registration.left.name(),
            right = registration.right.name(),
            "registered equality function"
        );
        registration
    }

    /// Registers an ordering function for exactly the pair `(T, U)`.
    pub fn register_ordering<T, U, F>(&self, function: F) -> Registration
    where
        T: Value,
        U: Value,
        F: Fn(&T, &U) -> Comparison + Send + Sync + 'static,
    {
        let registration = self.insert_ordering(
            TypeKey::of::<T>(),
            TypeKey::of::<U>(),
            typed_ordering(function),
        );
        tracing::debug!(
            left = registration.left.name(),
            right = registration.right.name(),
            "registered ordering function"
        );
        registration
    }

    /// Registers an equality function for arbitrary keys, including families.
    pub fn register_equality_for<F>(&self, left: TypeKey, right: TypeKey, function: F) -> Registration
    where
        F: Fn(&dyn Value, &dyn Value, &Self) -> bool + Send + Sync + 'static,
    {
        tracing::debug!(
            left = left.name(),
            right = right.name(),
            "registered equality function"
        );
        self.insert_equality(left, right, Arc::new(function))
    }

    /// Registers an ordering function for arbitrary keys, including families.
    pub fn register_ordering_for<F>(&self, left: TypeKey, right: TypeKey, function: F) -> Registration
    where
        F: Fn(&dyn Value, &dyn Value, &Self) -> Option<Comparison> + Send + Sync + 'static,
    {
        tracing::debug!(
            left = left.name(),
            right = right.name(),
            "registered ordering function"
        );
        self.insert_ordering(left, right, Arc::new(function))
    }

    pub(crate) fn install_equality<T, U, F>(&self, function: F)
    where
        T: Value,
        U: Value,
        F: Fn(&T, &U) -> bool + Send + Sync + 'static,
    {
        self.insert_equality(
            TypeKey::of::<T>(),
            TypeKey::of::<U>(),
            typed_equality(function),
        )
        .persist();
    }

    pub(crate) fn install_ordering<T, U, F>(&self, function: F)
    where
        T: Value,
        U: Value,
        F: Fn(&T, &U) -> Comparison + Send + Sync + 'static,
    {
        self.insert_ordering(
            TypeKey::of::<T>(),
            TypeKey::of::<U>(),
            typed_ordering(function),
        )
        .persist();
    }

    fn insert_equality(&self, left: TypeKey, right: TypeKey, function: EqualityFn) -> Registration {
        let mut state = self.state.write();
        let id = state.allocate_id();
        state.equality_row_mut(left).column_mut(right).push(id, function);
        self.registration(Table::Equality, left, right, id)
    }

    fn insert_ordering(&self, left: TypeKey, right: TypeKey, function: OrderingFn) -> Registration {
        let mut state = self.state.write();
        let id = state.allocate_id();
        state.ordering_slot_mut(left, right).entries.push(id, function);
        self.registration(Table::Ordering, left, right, id)
    }

    fn registration(&self, table: Table, left: TypeKey, right: TypeKey, id: RegistrationId) -> Registration {
        Registration {
            state: Arc::downgrade(&self.state),
            id,
            table,
            left,
            right,
            armed: true,
        }
    }

    // =========================================================================
    // Equality
    // =========================================================================

    /// Returns whether `lhs` and `rhs` are equal.
    ///
    /// Identical instances and two absent values are equal without any
    /// lookup. An absent value never equals a present one. Otherwise the most
    /// specific registered function decides, and
    /// [`Value::natural_equals`] is used when nothing is registered.
    pub fn are_equal<L, R>(&self, lhs: &L, rhs: &R) -> bool
    where
        L: Value + ?Sized,
        R: Value + ?Sized,
    {
        self.are_equal_values(lhs.as_present(), rhs.as_present())
    }

    /// [`are_equal`](Self::are_equal) on already-resolved operands.
    pub fn are_equal_values(&self, lhs: Option<&dyn Value>, rhs: Option<&dyn Value>) -> bool {
        let (lhs, rhs) = match (lhs, rhs) {
            (None, None) => return true,
            (Some(lhs), Some(rhs)) => (lhs, rhs),
            _ => return false,
        };
        if is_same_instance(lhs, rhs) {
            return true;
        }
        let function = self.state.read().resolve_equality(lhs, rhs);
        match function {
            Some(function) => function(lhs, rhs, self),
            None => {
                tracing::trace!(
                    left = lhs.type_name(),
                    right = rhs.type_name(),
                    "no equality function registered, using natural equality"
                );
                lhs.natural_equals(rhs)
            }
        }
    }

    /// Negation of [`are_equal`](Self::are_equal).
    pub fn is_not_equal<L, R>(&self, lhs: &L, rhs: &R) -> bool
    where
        L: Value + ?Sized,
        R: Value + ?Sized,
    {
        !self.are_equal(lhs, rhs)
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// Compares `lhs` with `rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedComparison`] when both values are present and no
    /// registered function or natural ordering applies to their types.
    pub fn compare<L, R>(&self, lhs: &L, rhs: &R) -> Result<Comparison, UnsupportedComparison>
    where
        L: Value + ?Sized,
        R: Value + ?Sized,
    {
        self.compare_values(lhs.as_present(), rhs.as_present())
    }

    /// [`compare`](Self::compare) on already-resolved operands.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedComparison`] when the pair is not ordered.
    pub fn compare_values(
        &self,
        lhs: Option<&dyn Value>,
        rhs: Option<&dyn Value>,
    ) -> Result<Comparison, UnsupportedComparison> {
        let (lhs, rhs) = match (lhs, rhs) {
            (None, None) => return Ok(Comparison::Equal),
            (None, Some(_)) => return Ok(Comparison::LessThan),
            (Some(_), None) => return Ok(Comparison::GreaterThan),
            (Some(lhs), Some(rhs)) => (lhs, rhs),
        };
        let function = self.state.read().resolve_ordering(lhs, rhs);
        if let Some(comparison) = function.and_then(|function| function(lhs, rhs, self)) {
            return Ok(comparison);
        }
        lhs.natural_compare(rhs).ok_or_else(|| {
            tracing::trace!(
                left = lhs.type_name(),
                right = rhs.type_name(),
                "comparison not supported"
            );
            UnsupportedComparison::new(lhs.type_name(), rhs.type_name())
        })
    }

    /// `lhs > rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedComparison`] when the pair is not ordered.
    pub fn is_greater_than<L, R>(&self, lhs: &L, rhs: &R) -> Result<bool, UnsupportedComparison>
    where
        L: Value + ?Sized,
        R: Value + ?Sized,
    {
        Ok(self.compare(lhs, rhs)?.is_greater_than())
    }

    /// `lhs >= rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedComparison`] when the pair is not ordered.
    pub fn is_greater_than_or_equal_to<L, R>(
        &self,
        lhs: &L,
        rhs: &R,
    ) -> Result<bool, UnsupportedComparison>
    where
        L: Value + ?Sized,
        R: Value + ?Sized,
    {
        Ok(self.compare(lhs, rhs)?.is_greater_than_or_equal())
    }

    /// `lhs < rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedComparison`] when the pair is not ordered.
    pub fn is_less_than<L, R>(&self, lhs: &L, rhs: &R) -> Result<bool, UnsupportedComparison>
    where
        L: Value + ?Sized,
        R: Value + ?Sized,
    {
        Ok(self.compare(lhs, rhs)?.is_less_than())
    }

    /// `lhs <= rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedComparison`] when the pair is not ordered.
    pub fn is_less_than_or_equal_to<L, R>(
        &self,
        lhs: &L,
        rhs: &R,
    ) -> Result<bool, UnsupportedComparison>
    where
        L: Value + ?Sized,
        R: Value + ?Sized,
    {
        Ok(self.compare(lhs, rhs)?.is_less_than_or_equal())
    }

    /// `lower <= value && value <= upper`. The bounds may have different
    /// types from `value` and from each other.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedComparison`] when a required pair is not ordered.
    pub fn is_between<B, V, C>(&self, lower: &B, value: &V, upper: &C) -> Result<bool, UnsupportedComparison>
    where
        B: Value + ?Sized,
        V: Value + ?Sized,
        C: Value + ?Sized,
    {
        Ok(self.is_less_than_or_equal_to(lower, value)?
            && self.is_less_than_or_equal_to(value, upper)?)
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Number of key pairs with a live equality function.
    pub fn equality_count(&self) -> usize {
        self.state.read().equality_count()
    }

    /// Number of key pairs with a live ordering function.
    pub fn ordering_count(&self) -> usize {
        self.state.read().ordering_count()
    }

    /// Whether an equality function is registered for exactly `(left, right)`.
    pub fn has_equality(&self, left: TypeKey, right: TypeKey) -> bool {
        let state = self.state.read();
        state
            .equality_row(left)
            .and_then(|row| row.column(right))
            .is_some_and(Entries::is_live)
    }

    /// Whether an ordering function is registered for exactly `(left, right)`.
    pub fn has_ordering(&self, left: TypeKey, right: TypeKey) -> bool {
        let state = self.state.read();
        state
            .ordering_position(left, right)
            .and_then(|index| state.ordering.get(index))
            .is_some_and(|slot| slot.entries.is_live())
    }
}

impl Default for ComparisonRegistry {
    /// Same as [`ComparisonRegistry::with_defaults`].
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for ComparisonRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        formatter
            .debug_struct("ComparisonRegistry")
            .field("equality_functions", &state.equality_count())
            .field("ordering_functions", &state.ordering_count())
            .finish()
    }
}

static_assertions::assert_impl_all!(ComparisonRegistry: Send, Sync);

fn typed_equality<T, U, F>(function: F) -> EqualityFn
where
    T: Value,
    U: Value,
    F: Fn(&T, &U) -> bool + Send + Sync + 'static,
{
    Arc::new(
        move |lhs: &dyn Value, rhs: &dyn Value, _: &ComparisonRegistry| {
            match (lhs.as_any().downcast_ref::<T>(), rhs.as_any().downcast_ref::<U>()) {
                (Some(lhs), Some(rhs)) => function(lhs, rhs),
                _ => false,
            }
        },
    )
}

fn typed_ordering<T, U, F>(function: F) -> OrderingFn
where
    T: Value,
    U: Value,
    F: Fn(&T, &U) -> Comparison + Send + Sync + 'static,
{
    Arc::new(
        move |lhs: &dyn Value, rhs: &dyn Value, _: &ComparisonRegistry| {
            lhs.as_any()
                .downcast_ref::<T>()
                .zip(rhs.as_any().downcast_ref::<U>())
                .map(|(lhs, rhs)| function(lhs, rhs))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::SEQUENCE;
    use rstest::rstest;

    #[derive(Debug)]
    struct Celsius(f64);

    #[derive(Debug)]
    struct Fahrenheit(f64);

    impl Value for Celsius {}
    impl Value for Fahrenheit {}

    #[rstest]
    fn test_empty_registry_uses_natural_fallbacks() {
        let registry = ComparisonRegistry::new();
        assert!(registry.are_equal(&3, &3));
        assert!(!registry.are_equal(&3_u8, &3_i32));
        assert_eq!(registry.compare(&1, &2), Ok(Comparison::LessThan));
    }

    #[rstest]
    fn test_register_then_revoke_restores_absence() {
        let registry = ComparisonRegistry::new();
        let registration = registry.register_equality(|celsius: &Celsius, fahrenheit: &Fahrenheit| {
            (celsius.0 * 9.0 / 5.0 + 32.0 - fahrenheit.0).abs() < 1e-9
        });
        assert!(registry.are_equal(&Celsius(100.0), &Fahrenheit(212.0)));
        assert!(registry.has_equality(TypeKey::of::<Celsius>(), TypeKey::of::<Fahrenheit>()));

        assert!(registration.revoke());
        assert!(!registry.are_equal(&Celsius(100.0), &Fahrenheit(212.0)));
        assert!(!registry.has_equality(TypeKey::of::<Celsius>(), TypeKey::of::<Fahrenheit>()));
    }

    #[rstest]
    fn test_reregister_overrides_and_revocation_restores_previous() {
        let registry = ComparisonRegistry::new();
        let first = registry.register_ordering(|_: &Celsius, _: &Celsius| Comparison::LessThan);
        let second = registry.register_ordering(|_: &Celsius, _: &Celsius| Comparison::GreaterThan);

        assert_eq!(
            registry.compare(&Celsius(1.0), &Celsius(2.0)),
            Ok(Comparison::GreaterThan)
        );
        drop(second);
        assert_eq!(
            registry.compare(&Celsius(1.0), &Celsius(2.0)),
            Ok(Comparison::LessThan)
        );
        drop(first);
        assert!(registry.compare(&Celsius(1.0), &Celsius(2.0)).is_err());
    }

    #[rstest]
    fn test_out_of_order_revocation_keeps_latest_live_entry() {
        let registry = ComparisonRegistry::new();
        let first = registry.register_ordering(|_: &Celsius, _: &Celsius| Comparison::LessThan);
        let second = registry.register_ordering(|_: &Celsius, _: &Celsius| Comparison::GreaterThan);

        drop(first);
        assert_eq!(
            registry.compare(&Celsius(1.0), &Celsius(2.0)),
            Ok(Comparison::GreaterThan)
        );
        drop(second);
        assert_eq!(registry.ordering_count(), 0);
    }

    #[rstest]
    fn test_persisted_registration_survives() {
        let registry = ComparisonRegistry::new();
        registry
            .register_equality(|_: &Celsius, _: &Celsius| true)
            .persist();
        assert!(registry.are_equal(&Celsius(1.0), &Celsius(2.0)));
    }

    #[rstest]
    fn test_revoke_after_registry_dropped_is_noop() {
        let registry = ComparisonRegistry::new();
        let registration = registry.register_equality(|_: &Celsius, _: &Celsius| true);
        drop(registry);
        assert!(!registration.revoke());
    }

    #[rstest]
    fn test_exact_match_wins_over_family() {
        let registry = ComparisonRegistry::new();
        let _family = registry.register_equality_for(SEQUENCE, SEQUENCE, |_, _, _| false);
        let _exact = registry.register_equality(|_: &Vec<i32>, _: &Vec<i32>| true);
        assert!(registry.are_equal(&vec![1], &vec![2]));
        assert!(!registry.are_equal(&vec![1_u8], &vec![1_u8]));
    }

    #[rstest]
    fn test_functions_may_reenter_registry() {
        let registry = ComparisonRegistry::new();
        let _registration = registry.register_equality_for(
            TypeKey::of::<Celsius>(),
            TypeKey::of::<Celsius>(),
            |lhs, rhs, registry| {
                let lhs = lhs.as_any().downcast_ref::<Celsius>().map(|celsius| celsius.0);
                let rhs = rhs.as_any().downcast_ref::<Celsius>().map(|celsius| celsius.0);
                registry.are_equal(&lhs, &rhs)
            },
        );
        assert!(registry.are_equal(&Celsius(4.0), &Celsius(4.0)));
    }

    #[rstest]
    fn test_debug_reports_counts() {
        let registry = ComparisonRegistry::new();
        let _registration = registry.register_equality(|_: &Celsius, _: &Celsius| true);
        assert_eq!(
            format!("{registry:?}"),
            "ComparisonRegistry { equality_functions: 1, ordering_functions: 0 }"
        );
    }
}
