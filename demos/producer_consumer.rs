//! Producer/consumer example
//!
//! Producers build events in pooled buffers and push them; one consumer
//! drains everything up to a shutdown marker with `pop_until`, and the
//! buffers go back to the pool.
//!
//! Run with `cargo run --example producer_consumer`.

use rwsync::{MetricsCollector, Pool, Queue};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug)]
enum Event {
    Data { producer: usize, payload: Vec<u8> },
    Shutdown,
}

fn main() {
    println!("Producer/Consumer Example");
    println!("=========================");

    let num_producers = 4;
    let events_per_producer = 10_000;

    let queue = Arc::new(Queue::new());
    let pool = Arc::new(Pool::with_capacity(1024, || Vec::with_capacity(64)));

    let start_time = Instant::now();

    let producers: Vec<_> = (0..num_producers)
        .map(|producer| {
            let queue = Arc::clone(&queue);
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                for i in 0..events_per_producer {
                    let mut payload = pool.get();
                    payload.clear();
                    payload.extend_from_slice(format!("event {i}").as_bytes());
                    queue.push(Event::Data { producer, payload });
                }
            })
        })
        .collect();

    let consumer = {
        let queue = Arc::clone(&queue);
        let pool = Arc::clone(&pool);
        thread::spawn(move || {
            let mut per_producer = vec![0usize; num_producers];
            loop {
                let batch = queue.pop_until(|event| matches!(event, Event::Shutdown));
                for event in batch {
                    if let Event::Data { producer, payload } = event {
                        per_producer[producer] += 1;
                        pool.put(payload);
                    }
                }
                // The marker is pushed last, so once it reaches the head
                // everything before it has been consumed.
                if !queue.pop_while(|event| matches!(event, Event::Shutdown)).is_empty() {
                    break;
                }
                thread::sleep(Duration::from_micros(50));
            }
            per_producer
        })
    };

    for producer in producers {
        producer.join().unwrap();
    }
    queue.push(Event::Shutdown);

    let per_producer = consumer.join().unwrap();
    let elapsed = start_time.elapsed();

    println!("Events per producer: {:?}", per_producer);
    println!("Elapsed: {:?}", elapsed);
    println!("Queue: {:?}", queue.metrics());
    println!("Pool:  {:?}", pool.metrics());
    println!("Pool hit rate: {:.1}%", pool.metrics().hit_rate());
}
