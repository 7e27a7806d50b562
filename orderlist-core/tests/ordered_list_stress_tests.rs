#[cfg(test)]
mod ordered_list_stress_tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::{Duration, Instant};

    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use serial_test::serial;

    use orderlist_core::data_structures::{NaturalOrder, OrderedList};

    // Helper function to create a fresh list shared between threads
    fn create_test_list() -> Arc<OrderedList<u64, NaturalOrder>> {
        Arc::new(OrderedList::default())
    }

    fn shuffled_keys(count: u64, seed: u64) -> Vec<u64> {
        let mut keys: Vec<u64> = (0..count).collect();
        keys.shuffle(&mut StdRng::seed_from_u64(seed));
        keys
    }

    #[test]
    fn test_random_insert_order_stays_sorted() {
        let list = OrderedList::new(NaturalOrder);
        let keys = shuffled_keys(5_000, 7);

        for key in &keys {
            list.insert(*key).unwrap();
        }

        let values = list.to_vec();
        assert_eq!(values, (0..5_000).collect::<Vec<u64>>());
        println!("Inserted {} keys in random order", keys.len());
    }

    #[test]
    #[serial]
    fn test_readers_never_see_unsorted_chain() {
        let list = create_test_list();
        let num_readers = 8;
        let barrier = Arc::new(Barrier::new(num_readers + 1));
        let stop = Arc::new(AtomicBool::new(false));
        let walks = Arc::new(AtomicUsize::new(0));

        let readers: Vec<_> = (0..num_readers)
            .map(|_| {
                let list = Arc::clone(&list);
                let barrier = Arc::clone(&barrier);
                let stop = Arc::clone(&stop);
                let walks = Arc::clone(&walks);
                thread::spawn(move || {
                    barrier.wait();
                    while !stop.load(Ordering::Acquire) {
                        let mut previous: Option<u64> = None;
                        for key in list.iter() {
                            if let Some(prev) = previous {
                                assert!(prev < *key, "chain out of order: {} then {}", prev, key);
                            }
                            previous = Some(*key);
                        }
                        walks.fetch_add(1, Ordering::Relaxed);
                    }
                })
            })
            .collect();

        barrier.wait();
        for key in shuffled_keys(3_000, 11) {
            list.insert(key).unwrap();
        }
        stop.store(true, Ordering::Release);

        for reader in readers {
            reader.join().unwrap();
        }

        assert_eq!(list.len(), 3_000);
        println!(
            "Readers completed {} walks while the writer inserted",
            walks.load(Ordering::Relaxed)
        );
    }

    #[test]
    #[serial]
    fn test_cursors_move_both_ways_during_inserts() {
        let list = create_test_list();
        let num_readers = 4;
        let barrier = Arc::new(Barrier::new(num_readers + 1));
        let stop = Arc::new(AtomicBool::new(false));

        // Even keys exist before readers start; the writer adds odd keys.
        for key in (0..1_000u64).step_by(2) {
            list.insert(key).unwrap();
        }

        let readers: Vec<_> = (0..num_readers)
            .map(|reader_id| {
                let list = Arc::clone(&list);
                let barrier = Arc::clone(&barrier);
                let stop = Arc::clone(&stop);
                thread::spawn(move || {
                    let mut rng = StdRng::seed_from_u64(reader_id as u64);
                    barrier.wait();
                    while !stop.load(Ordering::Acquire) {
                        let target = rng.random_range(0..1_000u64);
                        let mut cursor = list.cursor_at(&target);
                        let Ok(found) = cursor.key() else {
                            continue;
                        };
                        assert!(*found >= target);

                        if cursor.move_prev().is_ok() {
                            if let Ok(prev) = cursor.key() {
                                assert!(prev < found);
                                cursor.move_next().unwrap();
                                // An insert may land between prev and found.
                                let next = cursor.key().unwrap();
                                assert!(prev < next && next <= found);
                            }
                        }
                    }
                })
            })
            .collect();

        barrier.wait();
        for key in (1..1_000u64).step_by(2) {
            list.insert(key).unwrap();
        }
        stop.store(true, Ordering::Release);

        for reader in readers {
            reader.join().unwrap();
        }

        assert_eq!(list.to_vec(), (0..1_000).collect::<Vec<u64>>());
    }

    #[test]
    #[serial]
    fn test_contains_is_monotonic() {
        let list = create_test_list();
        let keys = Arc::new(shuffled_keys(2_000, 3));
        let published = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(2));

        let checker = {
            let list = Arc::clone(&list);
            let keys = Arc::clone(&keys);
            let published = Arc::clone(&published);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                loop {
                    let count = published.load(Ordering::Acquire);
                    // Everything the writer announced must be found.
                    for key in &keys[..count] {
                        assert!(list.contains(key), "Missing published key: {}", key);
                    }
                    if count == keys.len() {
                        break;
                    }
                }
            })
        };

        barrier.wait();
        for (i, key) in keys.iter().enumerate() {
            list.insert(*key).unwrap();
            published.store(i + 1, Ordering::Release);
        }

        checker.join().unwrap();
    }

    #[test]
    #[serial]
    fn test_competing_writers_are_rejected_not_lost() {
        let list = create_test_list();
        let num_threads = 8u64;
        let keys_per_thread = 250u64;
        let barrier = Arc::new(Barrier::new(num_threads as usize));
        let rejected = Arc::new(AtomicUsize::new(0));
        let start = Instant::now();

        let handles: Vec<_> = (0..num_threads)
            .map(|thread_id| {
                let list = Arc::clone(&list);
                let barrier = Arc::clone(&barrier);
                let rejected = Arc::clone(&rejected);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..keys_per_thread {
                        let key = i * num_threads + thread_id;
                        loop {
                            match list.insert(key) {
                                Ok(()) => break,
                                Err(err) => {
                                    assert!(err.is_writer_busy(), "unexpected {:?}", err);
                                    rejected.fetch_add(1, Ordering::Relaxed);
                                    thread::yield_now();
                                }
                            }
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(
            list.to_vec(),
            (0..num_threads * keys_per_thread).collect::<Vec<u64>>()
        );
        assert!(start.elapsed() < Duration::from_secs(60));
        println!(
            "Competing writers: {} rejected attempts",
            rejected.load(Ordering::Relaxed)
        );
    }
}
