//! Generation-checked handle table
//!
//! Every object handed across the boundary lives in one process-wide table.
//! Callers only ever hold [`ClockHandle`] values; a freed slot bumps its
//! generation so double frees and use-after-free are reported, not executed.

use std::fmt;

use clock_core::{Duration, LapTime};
use clock_time::{Stopwatch, Timer};
use parking_lot::Mutex;

use crate::error::HandleError;
use crate::types::ClockHandle;

/// Kind of object stored behind a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Duration,
    LapTime,
    Stopwatch,
    Timer,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Duration => "duration",
            ObjectKind::LapTime => "lap time",
            ObjectKind::Stopwatch => "stopwatch",
            ObjectKind::Timer => "timer",
        };
        f.write_str(name)
    }
}

/// An object owned by the table
#[derive(Debug)]
pub enum Object {
    Duration(Duration),
    LapTime(LapTime),
    Stopwatch(Stopwatch),
    Timer(Timer),
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Duration(_) => ObjectKind::Duration,
            Object::LapTime(_) => ObjectKind::LapTime,
            Object::Stopwatch(_) => ObjectKind::Stopwatch,
            Object::Timer(_) => ObjectKind::Timer,
        }
    }
}

/// Types that can be stored behind a handle
pub trait Handled: Sized {
    const KIND: ObjectKind;

    fn into_object(self) -> Object;
    fn from_object(object: Object) -> Option<Self>;
    fn borrow_from(object: &Object) -> Option<&Self>;
    fn borrow_mut_from(object: &mut Object) -> Option<&mut Self>;
}

macro_rules! handled {
    ($ty:ty, $variant:ident) => {
        impl Handled for $ty {
            const KIND: ObjectKind = ObjectKind::$variant;

            fn into_object(self) -> Object {
                Object::$variant(self)
            }

            fn from_object(object: Object) -> Option<Self> {
                match object {
                    Object::$variant(value) => Some(value),
                    _ => None,
                }
            }

            fn borrow_from(object: &Object) -> Option<&Self> {
                match object {
                    Object::$variant(value) => Some(value),
                    _ => None,
                }
            }

            fn borrow_mut_from(object: &mut Object) -> Option<&mut Self> {
                match object {
                    Object::$variant(value) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

handled!(Duration, Duration);
handled!(LapTime, LapTime);
handled!(Stopwatch, Stopwatch);
handled!(Timer, Timer);

#[derive(Debug)]
struct Slot {
    generation: u32,
    object: Option<Object>,
}

/// Slot table with free-list reuse
#[derive(Debug)]
pub struct HandleTable {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl HandleTable {
    pub const fn new() -> Self {
        HandleTable {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Store an object and issue a fresh handle for it
    pub fn insert(&mut self, object: Object) -> Result<ClockHandle, HandleError> {
        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.object = Some(object);
                ClockHandle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = u32::try_from(self.slots.len()).map_err(|_| HandleError::Exhausted)?;
                self.slots.push(Slot {
                    generation: 1,
                    object: Some(object),
                });
                ClockHandle {
                    index,
                    generation: 1,
                }
            }
        };
        self.live += 1;
        Ok(handle)
    }

    pub fn get(&self, handle: ClockHandle) -> Result<&Object, HandleError> {
        let slot = self.slot(handle)?;
        slot.object.as_ref().ok_or(HandleError::Stale {
            index: handle.index,
            generation: handle.generation,
        })
    }

    pub fn get_mut(&mut self, handle: ClockHandle) -> Result<&mut Object, HandleError> {
        self.slot(handle)?;
        let slot = &mut self.slots[handle.index as usize];
        slot.object.as_mut().ok_or(HandleError::Stale {
            index: handle.index,
            generation: handle.generation,
        })
    }

    /// Take the object out and invalidate every copy of the handle
    pub fn remove(&mut self, handle: ClockHandle) -> Result<Object, HandleError> {
        self.get(handle)?;
        let slot = &mut self.slots[handle.index as usize];
        let object = slot.object.take().ok_or(HandleError::Stale {
            index: handle.index,
            generation: handle.generation,
        })?;
        self.live -= 1;

        // A slot whose generation would wrap is retired instead of reused
        if slot.generation < u32::MAX {
            slot.generation += 1;
            self.free.push(handle.index);
        }
        Ok(object)
    }

    /// Number of live objects
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    fn slot(&self, handle: ClockHandle) -> Result<&Slot, HandleError> {
        if handle.is_null() {
            return Err(HandleError::Null);
        }
        let slot = self
            .slots
            .get(handle.index as usize)
            .ok_or(HandleError::Unknown(handle.index))?;
        if slot.generation != handle.generation || slot.object.is_none() {
            return Err(HandleError::Stale {
                index: handle.index,
                generation: handle.generation,
            });
        }
        Ok(slot)
    }
}

impl Default for HandleTable {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: Mutex<HandleTable> = parking_lot::const_mutex(HandleTable::new());

/// Move a value into the global table
pub fn register<T: Handled>(value: T) -> Result<ClockHandle, HandleError> {
    REGISTRY.lock().insert(value.into_object())
}

/// Borrow the value behind a handle.
///
/// The table lock is held while `f` runs; `f` must not call back into the registry.
pub fn with<T: Handled, R>(handle: ClockHandle, f: impl FnOnce(&T) -> R) -> Result<R, HandleError> {
    let table = REGISTRY.lock();
    let object = table.get(handle)?;
    match T::borrow_from(object) {
        Some(value) => Ok(f(value)),
        None => Err(HandleError::WrongKind {
            expected: T::KIND,
            found: object.kind(),
        }),
    }
}

/// Mutably borrow the value behind a handle. Same locking rules as [`with`].
pub fn with_mut<T: Handled, R>(
    handle: ClockHandle,
    f: impl FnOnce(&mut T) -> R,
) -> Result<R, HandleError> {
    let mut table = REGISTRY.lock();
    let object = table.get_mut(handle)?;
    let found = object.kind();
    match T::borrow_mut_from(object) {
        Some(value) => Ok(f(value)),
        None => Err(HandleError::WrongKind {
            expected: T::KIND,
            found,
        }),
    }
}

/// Remove the value behind a handle, invalidating the handle
pub fn release<T: Handled>(handle: ClockHandle) -> Result<T, HandleError> {
    let mut table = REGISTRY.lock();
    let found = table.get(handle)?.kind();
    if found != T::KIND {
        return Err(HandleError::WrongKind {
            expected: T::KIND,
            found,
        });
    }
    let object = table.remove(handle)?;
    T::from_object(object).ok_or(HandleError::WrongKind {
        expected: T::KIND,
        found,
    })
}

/// Number of live handles in the global table
pub fn live_handles() -> usize {
    REGISTRY.lock().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let mut table = HandleTable::new();
        let handle = table
            .insert(Object::Duration(Duration::from_secs(3)))
            .unwrap();

        assert!(!handle.is_null());
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(handle).unwrap().kind(), ObjectKind::Duration);

        let object = table.remove(handle).unwrap();
        assert!(matches!(object, Object::Duration(d) if d == Duration::from_secs(3)));
        assert!(table.is_empty());
    }

    #[test]
    fn test_double_remove_is_stale() {
        let mut table = HandleTable::new();
        let handle = table.insert(Object::Duration(Duration::ZERO)).unwrap();
        table.remove(handle).unwrap();

        assert!(matches!(
            table.remove(handle),
            Err(HandleError::Stale { .. })
        ));
    }

    #[test]
    fn test_reused_slot_rejects_old_handle() {
        let mut table = HandleTable::new();
        let old = table.insert(Object::Duration(Duration::ZERO)).unwrap();
        table.remove(old).unwrap();

        let new = table.insert(Object::Timer(Timer::from_secs(1))).unwrap();
        assert_eq!(new.index, old.index);
        assert_ne!(new.generation, old.generation);
        assert!(matches!(table.get(old), Err(HandleError::Stale { .. })));
        assert_eq!(table.get(new).unwrap().kind(), ObjectKind::Timer);
    }

    #[test]
    fn test_null_and_unknown() {
        let table = HandleTable::new();
        assert_eq!(table.get(ClockHandle::NULL).unwrap_err(), HandleError::Null);
        assert_eq!(
            table
                .get(ClockHandle {
                    index: 42,
                    generation: 1
                })
                .unwrap_err(),
            HandleError::Unknown(42)
        );
    }

    #[test]
    fn test_handled_conversions() {
        let object = Duration::from_millis(5).into_object();
        assert_eq!(object.kind(), <Duration as Handled>::KIND);
        assert!(<LapTime as Handled>::borrow_from(&object).is_none());
        assert_eq!(
            <Duration as Handled>::from_object(object),
            Some(Duration::from_millis(5))
        );
    }
}
