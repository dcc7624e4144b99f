use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

pub const DEFAULT_WORKERS: usize = 8;

/// Maps `f` over `items` on at most `workers` threads.
///
/// Workers pull the next index from a shared counter, so a slow item only
/// holds up its own worker. Output order matches input order.
pub fn map_bounded<T, R, F>(items: &[T], workers: usize, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let workers = workers.clamp(1, items.len().max(1));
    let next = AtomicUsize::new(0);

    let mut indexed: Vec<(usize, R)> = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            handles.push(scope.spawn(|| {
                let mut done = Vec::new();
                loop {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    let Some(item) = items.get(index) else {
                        break;
                    };
                    done.push((index, f(item)));
                }
                done
            }));
        }

        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    });

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, result)| result).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    #[test]
    fn test_map_bounded_keeps_input_order() {
        let ids: Vec<u64> = (1..=20).collect();
        let results = map_bounded(&ids, 4, |id| {
            // Later ids finish first
            thread::sleep(Duration::from_millis(21 - *id));
            id * 10
        });
        assert_eq!(results, ids.iter().map(|id| id * 10).collect::<Vec<_>>());
    }

    #[test]
    fn test_map_bounded_limits_concurrency() {
        let active = AtomicUsize::new(0);
        let peak = Mutex::new(0);
        let items: Vec<u32> = (0..16).collect();

        map_bounded(&items, 3, |_| {
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            {
                let mut peak = peak.lock().unwrap();
                *peak = (*peak).max(now);
            }
            thread::sleep(Duration::from_millis(5));
            active.fetch_sub(1, Ordering::SeqCst);
        });

        assert!(*peak.lock().unwrap() <= 3);
    }

    #[test]
    fn test_map_bounded_empty_and_zero_workers() {
        let empty: Vec<u32> = Vec::new();
        assert!(map_bounded(&empty, 4, |x| *x).is_empty());
        assert_eq!(map_bounded(&[1, 2, 3], 0, |x| x + 1), vec![2, 3, 4]);
    }
}
