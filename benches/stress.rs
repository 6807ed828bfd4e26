use std::sync::Arc;
use std::time::{Duration, Instant};

use ulid::Ulid;

use bookastay::model::*;
use bookastay::{Engine, NotifyHub};

/// 2026-01-01T00:00:00Z.
const BASE: Ms = 1_767_225_600_000;

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let idx = ((sorted.len() as f64) * p / 100.0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn print_latency(label: &str, latencies: &mut [Duration]) {
    latencies.sort();
    let total: Duration = latencies.iter().sum();
    let avg = total / latencies.len() as u32;
    println!("  {label}:");
    println!(
        "    n={}, avg={:.2}ms, p50={:.2}ms, p95={:.2}ms, p99={:.2}ms, max={:.2}ms",
        latencies.len(),
        avg.as_secs_f64() * 1000.0,
        percentile(latencies, 50.0).as_secs_f64() * 1000.0,
        percentile(latencies, 95.0).as_secs_f64() * 1000.0,
        percentile(latencies, 99.0).as_secs_f64() * 1000.0,
        latencies.last().unwrap().as_secs_f64() * 1000.0,
    );
}

fn make_room(price: f64, capacity: u32) -> Room {
    Room {
        id: Ulid::new(),
        name: "Camera".into(),
        room_type: "double".into(),
        capacity,
        beds: "1 double".into(),
        price,
        image: String::new(),
        amenities: vec![],
        available: true,
        description: String::new(),
    }
}

fn make_hostel(n: usize, rooms_per_hostel: usize) -> Hostel {
    Hostel {
        id: Ulid::new(),
        name: format!("Hostel {n}"),
        location: format!("Oraș {}", n % 12),
        address: String::new(),
        phone: String::new(),
        email: String::new(),
        images: vec![],
        rating: 5.0 + (n % 50) as f64 / 10.0,
        reviews: n as u32,
        description: String::new(),
        amenities: vec![],
        rooms: (0..rooms_per_hostel)
            .map(|i| make_room(200.0 + 50.0 * i as f64, 2 + (i % 4) as u32))
            .collect(),
        featured: n % 10 == 0,
        coordinates: None,
        admin_id: None,
    }
}

fn request(hostel: &Hostel, room_idx: usize, from_day: i64, nights: i64) -> NewBooking {
    NewBooking {
        hostel_id: hostel.id,
        room_id: hostel.rooms[room_idx].id,
        range: DateRange::new(BASE + from_day * DAY_MS, BASE + (from_day + nights) * DAY_MS),
        guests: 1,
        guest_name: "Bench Guest".into(),
        guest_email: "bench@exemplu.ro".into(),
        guest_phone: String::new(),
    }
}

fn setup(engine: &Engine, n_hostels: usize, rooms_per_hostel: usize) -> Vec<Hostel> {
    let hostels: Vec<Hostel> = (0..n_hostels)
        .map(|n| make_hostel(n, rooms_per_hostel))
        .collect();
    for h in &hostels {
        engine.create_hostel(h.clone()).unwrap();
    }
    println!(
        "  created {n_hostels} hostels x {rooms_per_hostel} rooms = {} rooms",
        n_hostels * rooms_per_hostel
    );
    hostels
}

fn phase1_sequential(engine: &Engine, hostel: &Hostel) {
    let n = 2000;
    let mut latencies = Vec::with_capacity(n);
    let start = Instant::now();

    // Back-to-back one-night stays, never conflicting
    for i in 0..n {
        let t = Instant::now();
        engine
            .create_booking(request(hostel, 0, i as i64, 1))
            .unwrap();
        latencies.push(t.elapsed());
    }

    let elapsed = start.elapsed();
    let ops = n as f64 / elapsed.as_secs_f64();
    println!("  {n} bookings in {:.2}s = {ops:.0} ops/sec", elapsed.as_secs_f64());
    print_latency("write latency", &mut latencies);
}

async fn phase2_concurrent(engine: Arc<Engine>, hostels: &[Hostel]) {
    let n_tasks = 10;
    let n_per_task = 200;

    let start = Instant::now();
    let mut handles = Vec::new();

    // Each task owns a distinct room, so every insert passes the conflict check
    for i in 0..n_tasks {
        let engine = engine.clone();
        let hostel = hostels[i % hostels.len()].clone();
        let room_idx = i % hostel.rooms.len();
        handles.push(tokio::spawn(async move {
            for j in 0..n_per_task {
                engine
                    .create_booking(request(&hostel, room_idx, j as i64, 1))
                    .unwrap();
            }
        }));
    }

    for h in handles {
        h.await.unwrap();
    }

    let elapsed = start.elapsed();
    let total = n_tasks * n_per_task;
    let ops = total as f64 / elapsed.as_secs_f64();
    println!(
        "  {n_tasks} tasks x {n_per_task} bookings = {total} total in {:.2}s = {ops:.0} ops/sec",
        elapsed.as_secs_f64()
    );
}

async fn phase3_contended_room(engine: Arc<Engine>, hostel: &Hostel) {
    let n_tasks = 10;
    let n_per_task = 200;

    let start = Instant::now();
    let mut handles = Vec::new();

    // All tasks fight over one room and the same day grid: exactly one winner
    // per day, everyone else bounces off the conflict check.
    for _ in 0..n_tasks {
        let engine = engine.clone();
        let hostel = hostel.clone();
        handles.push(tokio::spawn(async move {
            let mut won = 0usize;
            for j in 0..n_per_task {
                if engine.create_booking(request(&hostel, 0, j as i64, 1)).is_ok() {
                    won += 1;
                }
            }
            won
        }));
    }

    let mut won = 0;
    for h in handles {
        won += h.await.unwrap();
    }

    let elapsed = start.elapsed();
    println!(
        "  {n_tasks} tasks x {n_per_task} attempts: {won} won, {} rejected in {:.2}s",
        n_tasks * n_per_task - won,
        elapsed.as_secs_f64()
    );
    assert_eq!(won, n_per_task, "one winner per day");
}

async fn phase4_read_under_load(engine: Arc<Engine>, hostels: &[Hostel]) {
    let stop = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let mut writer_handles = Vec::new();

    // Writers keep appending bookings in the background
    for w in 0..5usize {
        let engine = engine.clone();
        let stop = stop.clone();
        let hostel = hostels[w].clone();
        writer_handles.push(tokio::spawn(async move {
            let mut i = 0i64;
            while !stop.load(std::sync::atomic::Ordering::Relaxed) {
                let room_idx = (i as usize) % hostel.rooms.len();
                let _ = engine.create_booking(request(&hostel, room_idx, 3000 + i, 1));
                i += 1;
                tokio::task::yield_now().await;
            }
        }));
    }

    // Readers project availability and measure latency
    let n_readers = 10;
    let reads_per_reader = 500;
    let mut reader_handles = Vec::new();

    for r in 0..n_readers {
        let engine = engine.clone();
        let hostel_id = hostels[r % hostels.len()].id;
        reader_handles.push(tokio::spawn(async move {
            let mut latencies = Vec::with_capacity(reads_per_reader);
            for i in 0..reads_per_reader {
                let from = BASE + (i as i64 % 1000) * DAY_MS;
                let t = Instant::now();
                engine
                    .room_availability(hostel_id, Some(from), Some(from + 3 * DAY_MS))
                    .unwrap();
                latencies.push(t.elapsed());
                tokio::task::yield_now().await;
            }
            latencies
        }));
    }

    let mut all_latencies = Vec::new();
    for h in reader_handles {
        all_latencies.extend(h.await.unwrap());
    }

    stop.store(true, std::sync::atomic::Ordering::Relaxed);
    for h in writer_handles {
        let _ = h.await;
    }

    print_latency("availability query", &mut all_latencies);
}

fn phase5_stats(engine: &Engine) {
    let n = 100;
    let mut latencies = Vec::with_capacity(n);
    let start = Instant::now();

    for _ in 0..n {
        let t = Instant::now();
        let (per_hostel, _overall) = engine.stats();
        latencies.push(t.elapsed());
        assert!(!per_hostel.is_empty());
    }

    let bookings = engine.bookings_snapshot().len();
    println!(
        "  {n} full aggregations over {bookings} bookings in {:.2}s",
        start.elapsed().as_secs_f64()
    );
    print_latency("stats aggregation", &mut latencies);
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    println!("=== bookastay stress benchmark ===\n");

    let engine = Arc::new(Engine::new(Arc::new(NotifyHub::new())));

    println!("[setup]");
    let hostels = setup(&engine, 50, 10);

    println!("\n[phase 1] sequential booking throughput");
    phase1_sequential(&engine, &hostels[49]);

    println!("\n[phase 2] concurrent bookings, distinct rooms");
    phase2_concurrent(engine.clone(), &hostels[10..20]).await;

    println!("\n[phase 3] contended room, racing submissions");
    phase3_contended_room(engine.clone(), &hostels[30]).await;

    println!("\n[phase 4] availability reads under write load");
    phase4_read_under_load(engine.clone(), &hostels[..10]).await;

    println!("\n[phase 5] dashboard statistics");
    phase5_stats(&engine);

    println!("\n=== benchmark complete ===");
}
