//! Producer/consumer contention on the shared store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use daqloop::store::SharedStore;

const CAP: usize = 16;

#[test]
fn readers_never_observe_a_torn_store() {
    let store = Arc::new(SharedStore::<CAP>::new());
    let done = Arc::new(AtomicBool::new(false));

    let producers: Vec<_> = (0..2)
        .map(|p| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..5_000u32 {
                    store.insert((p * 10_000 + i) as f32);
                }
            })
        })
        .collect();

    let evictor = {
        let store = Arc::clone(&store);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut n = 1;
            while !done.load(Ordering::Relaxed) {
                store.evict_oldest(n);
                n = n % 4 + 1;
                thread::yield_now();
            }
        })
    };

    let reader = {
        let store = Arc::clone(&store);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut checks = 0u32;
            loop {
                store.read(CAP as i64, |readout| {
                    let count = readout.clamped.map_or(CAP, |c| c.effective);
                    assert_eq!(readout.samples.clone().count(), count);
                    if count == 0 {
                        assert_eq!(readout.average, 0.0);
                    } else {
                        let mean =
                            readout.samples.map(f64::from).sum::<f64>() / count as f64;
                        assert!((mean - readout.average).abs() <= 1e-6 * mean.abs().max(1.0));
                    }
                });
                checks += 1;
                if done.load(Ordering::Relaxed) {
                    break checks;
                }
            }
        })
    };

    for p in producers {
        p.join().unwrap();
    }
    done.store(true, Ordering::Relaxed);
    evictor.join().unwrap();
    assert!(reader.join().unwrap() > 0);

    let stats = store.stats();
    assert!(stats.count <= CAP);
    assert_eq!(stats.capacity, CAP);
}
