use std::sync::{Mutex, MutexGuard, PoisonError};

/// Single-value mailbox: writers overwrite, the reader takes and clears.
/// Nothing is ever queued behind the current value.
#[derive(Debug)]
pub struct LatestSlot<T> {
    value: Mutex<Option<T>>,
}

impl<T> LatestSlot<T> {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }

    pub fn publish(&self, value: T) {
        *self.lock() = Some(value);
    }

    pub fn take(&self) -> Option<T> {
        self.lock().take()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        // the slot holds plain data, so a panicked writer cannot leave it torn
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn newest_value_wins() {
        let slot = LatestSlot::new();
        slot.publish(1);
        slot.publish(2);
        assert_eq!(slot.take(), Some(2));
        assert_eq!(slot.take(), None);
        assert!(slot.is_empty());
    }

    #[test]
    fn concurrent_writers_leave_one_whole_value() {
        let slot = Arc::new(LatestSlot::new());
        let writers: Vec<_> = (0..4u64)
            .map(|w| {
                let slot = Arc::clone(&slot);
                thread::spawn(move || {
                    for i in 0..1000u64 {
                        slot.publish((w, i, w * 1000 + i));
                    }
                })
            })
            .collect();

        for _ in 0..1000 {
            if let Some((w, i, check)) = slot.take() {
                assert_eq!(check, w * 1000 + i);
            }
        }
        for writer in writers {
            writer.join().unwrap();
        }
    }
}
