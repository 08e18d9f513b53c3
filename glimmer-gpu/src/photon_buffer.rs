use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use crate::Photon;

/// Capacity-bounded, append-only collection of photons that can be filled
/// from many threads at once.
///
/// Pushes past the capacity are dropped (and counted), never stored.
#[derive(Debug, Default)]
pub struct PhotonBuffer {
    slots: Vec<OnceLock<Photon>>,
    len: AtomicU32,
    dropped: AtomicU32,
}

impl PhotonBuffer {
    pub fn new(capacity: usize) -> Self {
        let mut this = Self::default();

        this.resize(capacity);
        this
    }

    /// Appends photon, returning `false` if the buffer is already full.
    pub fn push(&self, photon: Photon) -> bool {
        let capacity = self.slots.len() as u32;

        let idx = self.len.fetch_update(
            Ordering::Relaxed,
            Ordering::Relaxed,
            |len| (len < capacity).then_some(len + 1),
        );

        let Ok(idx) = idx else {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        };

        // Each index is handed out once per frame, so the slot is guaranteed
        // to be vacant here
        self.slots[idx as usize].set(photon).is_ok()
    }

    /// Resets every slot, so that nothing appended in previous frames can be
    /// observed anymore.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.take();
        }

        *self.len.get_mut() = 0;
        *self.dropped.get_mut() = 0;
    }

    pub fn resize(&mut self, capacity: usize) {
        if capacity == self.slots.len() {
            self.clear();
        } else {
            self.slots = (0..capacity).map(|_| OnceLock::new()).collect();
            *self.len.get_mut() = 0;
            *self.dropped.get_mut() = 0;
        }
    }

    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of photons rejected since the last clear.
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed) as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = &Photon> + '_ {
        self.slots[..self.len()].iter().filter_map(OnceLock::get)
    }

    pub fn to_vec(&self) -> Vec<Photon> {
        self.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use glam::{vec3, Vec3};

    use super::*;
    use crate::PhotonStream;

    fn photon(x: f32) -> Photon {
        Photon::new(vec3(x, 0.0, 0.0), -Vec3::Y, Vec3::ONE, PhotonStream::Global)
    }

    #[test]
    fn push_saturates() {
        let mut target = PhotonBuffer::new(3);

        assert!(target.push(photon(0.0)));
        assert!(target.push(photon(1.0)));
        assert!(target.push(photon(2.0)));
        assert!(!target.push(photon(3.0)));

        assert_eq!(3, target.len());
        assert_eq!(1, target.dropped());

        let xs: Vec<_> = target.iter().map(|p| p.position.x).collect();

        assert_eq!(vec![0.0, 1.0, 2.0], xs);

        // ---

        target.clear();

        assert!(target.is_empty());
        assert_eq!(0, target.dropped());
        assert_eq!(0, target.iter().count());
        assert!(target.push(photon(4.0)));
        assert_eq!(vec![photon(4.0)], target.to_vec());
    }

    #[test]
    fn push_from_many_threads() {
        let target = PhotonBuffer::new(100);

        thread::scope(|s| {
            for t in 0..5 {
                let target = &target;

                s.spawn(move || {
                    for i in 0..50 {
                        target.push(photon((t * 50 + i) as f32));
                    }
                });
            }
        });

        assert_eq!(100, target.len());
        assert_eq!(150, target.dropped());

        let mut xs: Vec<_> =
            target.iter().map(|p| p.position.x as u32).collect();

        xs.sort_unstable();
        xs.dedup();

        assert_eq!(100, xs.len());
        assert!(xs.iter().all(|&x| x < 250));
    }

    #[test]
    fn resize() {
        let mut target = PhotonBuffer::new(1);

        target.push(photon(0.0));
        target.resize(4);

        assert_eq!(4, target.capacity());
        assert!(target.is_empty());
    }
}
