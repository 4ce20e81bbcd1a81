// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Backing storage for Array exotic object elements.
//!
//! Elements start out in one of three packed, homogeneous kinds and move
//! towards more general kinds as values of other types or holes get written:
//!
//! ```text
//! PackedSmi -> PackedDouble -> Packed -> Holey -> Dictionary
//! ```
//!
//! Transitions only ever go right. The packed vectors are reference counted
//! so that arrays can share a backing store copy-on-write.

use std::rc::Rc;

use ahash::AHashMap;

use crate::{SmallInteger, ecmascript::types::Value};

/// Holes further than this past the current length push the storage into
/// dictionary mode instead of allocating a holey vector.
pub(crate) const MAX_HOLEY_GAP: u32 = 1024;

/// The single NaN bit pattern allowed in [`ElementStorage::PackedDouble`].
pub const CANONICAL_NAN_BITS: u64 = 0x7FF8_0000_0000_0000;

#[inline]
pub(crate) fn canonicalize_nan(value: f64) -> f64 {
    if value.is_nan() {
        f64::from_bits(CANONICAL_NAN_BITS)
    } else {
        value
    }
}

#[inline]
pub(crate) fn is_canonical(value: f64) -> bool {
    !value.is_nan() || value.to_bits() == CANONICAL_NAN_BITS
}

/// Storage layout of an Array's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementsKind {
    /// Every element is present and an integer-tagged Number.
    PackedSmi,
    /// Every element is present and a raw, NaN-canonical double.
    PackedDouble,
    /// Every element is present; any Value.
    Packed,
    /// Elements may be holes.
    Holey,
    /// Sparse map of present elements with an explicit length.
    Dictionary,
}

/// Fast path eligibility of an Array, as reported by
/// [`Array::packed_representation`](crate::ecmascript::builtins::Array::packed_representation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementsRepresentation {
    IntegerPacked,
    ReferencePacked,
    DoublePacked,
    Ineligible,
}

#[derive(Debug, Clone)]
pub(crate) enum ElementStorage {
    PackedSmi(Rc<Vec<SmallInteger>>),
    PackedDouble(Rc<Vec<f64>>),
    Packed(Rc<Vec<Value>>),
    Holey(Rc<Vec<Option<Value>>>),
    Dictionary {
        len: u32,
        values: AHashMap<u32, Value>,
    },
}

impl Default for ElementStorage {
    fn default() -> Self {
        Self::PackedSmi(Rc::default())
    }
}

fn write_slot<T: Clone>(storage: &mut Rc<Vec<T>>, index: u32, value: T) {
    let storage = Rc::make_mut(storage);
    let index = index as usize;
    if index == storage.len() {
        storage.push(value);
    } else {
        storage[index] = value;
    }
}

impl ElementStorage {
    /// Picks the most specific packed kind able to hold all of `values`.
    pub(crate) fn from_values(values: &[Value]) -> Self {
        if let Some(integers) = values
            .iter()
            .map(|value| match value {
                Value::Integer(integer) => Some(*integer),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
        {
            return Self::PackedSmi(Rc::new(integers));
        }
        if let Some(doubles) = values
            .iter()
            .map(|value| value.to_f64().map(canonicalize_nan))
            .collect::<Option<Vec<_>>>()
        {
            return Self::PackedDouble(Rc::new(doubles));
        }
        Self::Packed(Rc::new(values.to_vec()))
    }

    pub(crate) fn from_optional_values(values: &[Option<Value>]) -> Self {
        if let Some(values) = values.iter().copied().collect::<Option<Vec<_>>>() {
            Self::from_values(&values)
        } else {
            Self::Holey(Rc::new(values.to_vec()))
        }
    }

    pub(crate) fn kind(&self) -> ElementsKind {
        match self {
            Self::PackedSmi(_) => ElementsKind::PackedSmi,
            Self::PackedDouble(_) => ElementsKind::PackedDouble,
            Self::Packed(_) => ElementsKind::Packed,
            Self::Holey(_) => ElementsKind::Holey,
            Self::Dictionary { .. } => ElementsKind::Dictionary,
        }
    }

    pub(crate) fn len(&self) -> u32 {
        match self {
            Self::PackedSmi(v) => v.len() as u32,
            Self::PackedDouble(v) => v.len() as u32,
            Self::Packed(v) => v.len() as u32,
            Self::Holey(v) => v.len() as u32,
            Self::Dictionary { len, .. } => *len,
        }
    }

    /// True if the backing store is currently shared with another Array.
    pub(crate) fn is_shared(&self) -> bool {
        match self {
            Self::PackedSmi(v) => Rc::strong_count(v) > 1,
            Self::PackedDouble(v) => Rc::strong_count(v) > 1,
            Self::Packed(v) => Rc::strong_count(v) > 1,
            Self::Holey(v) => Rc::strong_count(v) > 1,
            Self::Dictionary { .. } => false,
        }
    }

    /// Copy-on-write materialisation: after this call the backing store is
    /// exclusively owned and can be mutated in place.
    pub(crate) fn make_exclusive(&mut self) {
        match self {
            Self::PackedSmi(v) => {
                Rc::make_mut(v);
            }
            Self::PackedDouble(v) => {
                Rc::make_mut(v);
            }
            Self::Packed(v) => {
                Rc::make_mut(v);
            }
            Self::Holey(v) => {
                Rc::make_mut(v);
            }
            Self::Dictionary { .. } => {}
        }
    }

    pub(crate) fn get(&self, index: u32) -> Option<Value> {
        let i = index as usize;
        match self {
            Self::PackedSmi(v) => v.get(i).map(|integer| Value::Integer(*integer)),
            Self::PackedDouble(v) => v.get(i).map(|double| Value::from_f64(*double)),
            Self::Packed(v) => v.get(i).copied(),
            Self::Holey(v) => v.get(i).copied().flatten(),
            Self::Dictionary { values, .. } => values.get(&index).copied(),
        }
    }

    /// Writes `value` at `index`, growing the length if needed and
    /// transitioning to a more general kind if the value or a resulting gap
    /// requires it.
    pub(crate) fn set(&mut self, index: u32, value: Value) {
        if index > self.len() {
            self.extend_with_holes(index);
        }
        if let Some(kind) = self.required_transition(value) {
            self.transition_to(kind);
        }
        match self {
            Self::PackedSmi(v) => match value {
                Value::Integer(integer) => write_slot(v, index, integer),
                _ => unreachable!(),
            },
            Self::PackedDouble(v) => match value.to_f64() {
                Some(double) => write_slot(v, index, canonicalize_nan(double)),
                None => unreachable!(),
            },
            Self::Packed(v) => write_slot(v, index, value),
            Self::Holey(v) => write_slot(v, index, Some(value)),
            Self::Dictionary { len, values } => {
                values.insert(index, value);
                if index >= *len {
                    *len = index + 1;
                }
            }
        }
    }

    /// Turns the element at `index` into a hole. The length is unchanged.
    pub(crate) fn delete(&mut self, index: u32) {
        if index >= self.len() {
            return;
        }
        match self {
            Self::PackedSmi(_) | Self::PackedDouble(_) | Self::Packed(_) => {
                self.transition_to(ElementsKind::Holey);
                self.delete(index);
            }
            Self::Holey(v) => {
                Rc::make_mut(v)[index as usize] = None;
            }
            Self::Dictionary { values, .. } => {
                values.remove(&index);
            }
        }
    }

    pub(crate) fn set_len(&mut self, new_len: u32) {
        let len = self.len();
        if new_len == len {
            return;
        }
        if new_len > len {
            self.extend_with_holes(new_len);
            return;
        }
        let new_len_usize = new_len as usize;
        match self {
            Self::PackedSmi(v) => Rc::make_mut(v).truncate(new_len_usize),
            Self::PackedDouble(v) => Rc::make_mut(v).truncate(new_len_usize),
            Self::Packed(v) => Rc::make_mut(v).truncate(new_len_usize),
            Self::Holey(v) => Rc::make_mut(v).truncate(new_len_usize),
            Self::Dictionary { len, values } => {
                values.retain(|index, _| *index < new_len);
                *len = new_len;
            }
        }
    }

    /// Indexes of all present elements, in ascending order.
    pub(crate) fn present_indexes(&self) -> Vec<u32> {
        match self {
            Self::PackedSmi(_) | Self::PackedDouble(_) | Self::Packed(_) => (0..self.len()).collect(),
            Self::Holey(v) => v
                .iter()
                .enumerate()
                .filter(|(_, value)| value.is_some())
                .map(|(index, _)| index as u32)
                .collect(),
            Self::Dictionary { values, .. } => {
                let mut indexes = values.keys().copied().collect::<Vec<_>>();
                indexes.sort_unstable();
                indexes
            }
        }
    }

    fn required_transition(&self, value: Value) -> Option<ElementsKind> {
        match (self, value) {
            (Self::PackedSmi(_), Value::Integer(_)) => None,
            (Self::PackedSmi(_), Value::Number(_)) => Some(ElementsKind::PackedDouble),
            (Self::PackedDouble(_), Value::Integer(_) | Value::Number(_)) => None,
            (Self::PackedSmi(_) | Self::PackedDouble(_), _) => Some(ElementsKind::Packed),
            _ => None,
        }
    }

    fn extend_with_holes(&mut self, new_len: u32) {
        let len = self.len();
        debug_assert!(new_len > len);
        if matches!(self, Self::Dictionary { .. }) || new_len - len > MAX_HOLEY_GAP {
            self.transition_to(ElementsKind::Dictionary);
            if let Self::Dictionary { len, .. } = self {
                *len = new_len;
            }
        } else {
            self.transition_to(ElementsKind::Holey);
            if let Self::Holey(v) = self {
                Rc::make_mut(v).resize(new_len as usize, None);
            }
        }
    }

    fn transition_to(&mut self, kind: ElementsKind) {
        if self.kind() == kind {
            return;
        }
        let next = match (&*self, kind) {
            (Self::PackedSmi(v), ElementsKind::PackedDouble) => {
                Self::PackedDouble(Rc::new(v.iter().map(|integer| integer.into_f64()).collect()))
            }
            (Self::PackedSmi(_) | Self::PackedDouble(_), ElementsKind::Packed) => Self::Packed(
                Rc::new((0..self.len()).filter_map(|index| self.get(index)).collect()),
            ),
            (
                Self::PackedSmi(_) | Self::PackedDouble(_) | Self::Packed(_),
                ElementsKind::Holey,
            ) => Self::Holey(Rc::new(
                (0..self.len()).map(|index| self.get(index)).collect(),
            )),
            (_, ElementsKind::Dictionary) => Self::Dictionary {
                len: self.len(),
                values: self
                    .present_indexes()
                    .into_iter()
                    .filter_map(|index| Some((index, self.get(index)?)))
                    .collect(),
            },
            (from, to) => unreachable!("invalid elements transition {:?} -> {:?}", from.kind(), to),
        };
        *self = next;
    }

    /// Runs the in-place swap engine on the packed storage matching
    /// `representation`. Returns false if the storage does not match, in which
    /// case nothing was touched.
    pub(crate) fn reverse_packed(&mut self, representation: ElementsRepresentation) -> bool {
        match (self, representation) {
            (Self::PackedSmi(v), ElementsRepresentation::IntegerPacked) => {
                reverse_packed::<SmiElements>(Rc::make_mut(v).as_mut_slice());
            }
            (Self::PackedDouble(v), ElementsRepresentation::DoublePacked) => {
                reverse_packed::<DoubleElements>(Rc::make_mut(v).as_mut_slice());
            }
            (Self::Packed(v), ElementsRepresentation::ReferencePacked) => {
                reverse_packed::<ValueElements>(Rc::make_mut(v).as_mut_slice());
            }
            _ => return false,
        }
        true
    }
}

/// Load and store primitives of one packed element representation.
///
/// Both operate directly on raw storage: no presence checks, no traps.
pub(crate) trait ElementRepr {
    type Element: Copy;

    fn load(storage: &[Self::Element], index: usize) -> Self::Element;

    fn store(storage: &mut [Self::Element], index: usize, value: Self::Element);
}

/// Integer-tagged Numbers.
pub(crate) struct SmiElements;

/// Raw doubles in canonical NaN form.
pub(crate) struct DoubleElements;

/// Arbitrary Values.
///
/// A write barrier is never needed when storing: the swap engine only
/// permutes Values that the same backing store already holds.
pub(crate) struct ValueElements;

impl ElementRepr for SmiElements {
    type Element = SmallInteger;

    #[inline(always)]
    fn load(storage: &[SmallInteger], index: usize) -> SmallInteger {
        storage[index]
    }

    #[inline(always)]
    fn store(storage: &mut [SmallInteger], index: usize, value: SmallInteger) {
        storage[index] = value;
    }
}

impl ElementRepr for DoubleElements {
    type Element = f64;

    #[inline(always)]
    fn load(storage: &[f64], index: usize) -> f64 {
        storage[index]
    }

    #[inline(always)]
    fn store(storage: &mut [f64], index: usize, value: f64) {
        assert!(
            is_canonical(value),
            "non-canonical NaN {:#018x} in double elements",
            value.to_bits()
        );
        storage[index] = value;
    }
}

impl ElementRepr for ValueElements {
    type Element = Value;

    #[inline(always)]
    fn load(storage: &[Value], index: usize) -> Value {
        storage[index]
    }

    #[inline(always)]
    fn store(storage: &mut [Value], index: usize, value: Value) {
        storage[index] = value;
    }
}

/// Reverses hole-free homogeneous storage in place with exactly
/// `floor(len / 2)` swaps.
pub(crate) fn reverse_packed<R: ElementRepr>(storage: &mut [R::Element]) {
    let Some(mut upper) = storage.len().checked_sub(1) else {
        return;
    };
    let mut lower = 0;
    while lower < upper {
        let lower_value = R::load(storage, lower);
        let upper_value = R::load(storage, upper);
        R::store(storage, lower, upper_value);
        R::store(storage, upper, lower_value);
        lower += 1;
        upper -= 1;
    }
}
