//! Unit tests for shop-sync.

#[cfg(test)]
mod fair_mutex_tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::thread;

    use crate::FairMutex;

    /// Spin until `mutex` has exactly `n` queued waiters.
    fn wait_for_queue<T>(mutex: &FairMutex<T>, n: usize) {
        while mutex.queued() < n {
            thread::yield_now();
        }
    }

    #[test]
    fn lock_and_mutate() {
        let m = FairMutex::new(vec![1, 2]);
        m.lock().push(3);
        assert_eq!(*m.lock(), vec![1, 2, 3]);
    }

    #[test]
    fn guard_drop_releases() {
        let m = FairMutex::new(0);
        let g = m.lock();
        assert!(m.is_locked());
        g.unlock();
        assert!(!m.is_locked());
        *m.lock() += 1;
        assert_eq!(*m.lock(), 1);
    }

    #[test]
    fn late_arrival_waits_behind_queued_thread() {
        let m = Arc::new(FairMutex::new(Vec::new()));
        let held = m.lock();

        let waiter = {
            let m = Arc::clone(&m);
            thread::spawn(move || m.lock().push("waiter"))
        };
        wait_for_queue(&m, 1);
        drop(held);

        m.lock().push("late");
        waiter.join().unwrap();
        assert_eq!(*m.lock(), vec!["waiter", "late"]);
    }

    #[test]
    fn grants_in_request_order() {
        let m = Arc::new(FairMutex::new(Vec::new()));
        let held = m.lock();

        let mut handles = Vec::new();
        for i in 0..6 {
            let m2 = Arc::clone(&m);
            handles.push(thread::spawn(move || m2.lock().push(i)));
            // Ensure thread `i` has drawn its ticket before `i + 1` starts.
            wait_for_queue(&m, i + 1);
        }
        assert_eq!(m.queued(), 6);
        drop(held);

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(*m.lock(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn mutual_exclusion_under_contention() {
        const THREADS: usize = 8;
        const ROUNDS: usize = 500;

        let m = Arc::new(FairMutex::new(0usize));
        let inside = Arc::new(AtomicBool::new(false));
        let overlaps = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let (m, inside, overlaps) = (m.clone(), inside.clone(), overlaps.clone());
                thread::spawn(move || {
                    for _ in 0..ROUNDS {
                        let mut g = m.lock();
                        if inside.swap(true, Ordering::SeqCst) {
                            overlaps.fetch_add(1, Ordering::SeqCst);
                        }
                        *g += 1;
                        inside.store(false, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(overlaps.load(Ordering::SeqCst), 0);
        assert_eq!(*m.lock(), THREADS * ROUNDS);
        assert!(!m.is_locked());
    }
}
