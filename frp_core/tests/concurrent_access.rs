//! Producer/consumer access from separate threads.
//!
//! The sampling thread feeds identical round turns while a reader computes
//! continuously. Every snapshot must be internally consistent: section
//! sample counts add up to a number of samples that was actually fed, and
//! the averages never drift from the constant diameters.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use frp::config::FrpConfig;
use frp_core::{Accumulator, ScanState};

const TURNS: usize = 200;
const STEPS: usize = 36;

#[test]
fn test_compute_never_sees_a_torn_snapshot() {
    let acc = Arc::new(Accumulator::new(FrpConfig::default()).unwrap());
    let done = Arc::new(AtomicBool::new(false));

    let producer = {
        let acc = Arc::clone(&acc);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for _ in 0..TURNS {
                for i in 0..STEPS {
                    acc.add_sample(i as f64 * 10.0, 150.0, 75.0).unwrap();
                }
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    let consumer = {
        let acc = Arc::clone(&acc);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut last_total = 0;
            while !done.load(Ordering::SeqCst) {
                let report = acc.compute();
                let total: usize = report.sections.iter().map(|s| s.sample_count).sum();
                assert!(total >= last_total, "sample count went backwards");
                last_total = total;

                for (k, s) in report.sections.iter().enumerate() {
                    assert_eq!(s.index, k);
                    let closed = k + 1 < report.sections.len();
                    if closed {
                        assert_eq!(s.sample_count, STEPS);
                    }
                }
                if total > 0 {
                    assert!((report.result.outer_diameter_avg - 150.0).abs() < 1e-9);
                    assert!((report.result.inner_diameter_avg - 75.0).abs() < 1e-9);
                }
            }
        })
    };

    producer.join().unwrap();
    consumer.join().unwrap();

    let report = acc.compute();
    assert_eq!(report.sections.len(), TURNS);
    assert_eq!(report.result.length, TURNS as f64);
}

#[test]
fn test_reset_racing_compute_does_not_crash() {
    let acc = Arc::new(Accumulator::new(FrpConfig::default()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let acc = Arc::clone(&acc);
            thread::spawn(move || {
                for n in 0..500 {
                    match (t + n) % 3 {
                        0 => acc.reset(),
                        1 => {
                            acc.add_sample((n % 36) as f64 * 10.0, 150.0, 75.0).unwrap();
                        }
                        _ => {
                            let report = acc.compute();
                            assert_eq!(report.result.ok, !report.sections.is_empty());
                        }
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    acc.reset();
    assert_eq!(acc.state(), ScanState::Empty);
}
