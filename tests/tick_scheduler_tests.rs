use beattickrs::{MetronomeError, Tick, TickCommand, TickScheduler};
use std::thread;
use std::time::{Duration, Instant};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Drains ticks for `window` and returns how many arrived
fn count_ticks(scheduler: &TickScheduler, window: Duration) -> usize {
    let deadline = Instant::now() + window;
    let mut count = 0;
    loop {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        if scheduler.recv_timeout(deadline - now).unwrap().is_some() {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_emits_periodic_ticks() {
        init_logging();
        let mut scheduler = TickScheduler::with_interval(20.0).unwrap();
        scheduler.start().unwrap();

        // 12 periods fit in the window; allow for scheduling jitter
        let count = count_ticks(&scheduler, Duration::from_millis(250));
        assert!(count >= 8, "expected at least 8 ticks, got {}", count);
        assert!(count <= 14, "expected at most 14 ticks, got {}", count);
    }

    #[test]
    fn test_ticks_are_spaced_by_period() {
        init_logging();
        let mut scheduler = TickScheduler::with_interval(40.0).unwrap();
        scheduler.start().unwrap();

        scheduler.recv().unwrap();
        let mut last = Instant::now();
        for _ in 0..4 {
            scheduler.recv().unwrap();
            let now = Instant::now();
            let spacing = now.duration_since(last);
            assert!(
                spacing >= Duration::from_millis(10) && spacing <= Duration::from_millis(150),
                "spacing {:?} too far from 40 ms",
                spacing
            );
            last = now;
        }
    }

    #[test]
    fn test_stop_discards_in_flight_ticks() {
        init_logging();
        let mut scheduler = TickScheduler::with_interval(5.0).unwrap();
        scheduler.start().unwrap();

        // let several ticks pile up unread
        thread::sleep(Duration::from_millis(60));
        scheduler.stop().unwrap();

        assert_eq!(scheduler.try_recv().unwrap(), None);
        assert_eq!(
            scheduler.recv_timeout(Duration::from_millis(100)).unwrap(),
            None
        );
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_stop_twice_is_same_as_once() {
        init_logging();
        let mut scheduler = TickScheduler::with_interval(10.0).unwrap();
        scheduler.start().unwrap();
        scheduler.recv().unwrap();

        scheduler.stop().unwrap();
        scheduler.stop().unwrap();
        assert_eq!(
            scheduler.recv_timeout(Duration::from_millis(60)).unwrap(),
            None
        );

        // still controllable afterwards
        scheduler.start().unwrap();
        assert_eq!(
            scheduler.recv_timeout(Duration::from_millis(500)).unwrap(),
            Some(Tick)
        );
    }

    #[test]
    fn test_stop_while_idle_is_noop() {
        let mut scheduler = TickScheduler::new().unwrap();
        scheduler.stop().unwrap();
        assert_eq!(
            scheduler.recv_timeout(Duration::from_millis(60)).unwrap(),
            None
        );
    }

    #[test]
    fn test_redundant_start_does_not_double_rate() {
        init_logging();
        let mut scheduler = TickScheduler::with_interval(40.0).unwrap();
        scheduler.start().unwrap();
        scheduler.start().unwrap();
        scheduler.start().unwrap();

        // 10 periods; a doubled timer would produce about 20
        let count = count_ticks(&scheduler, Duration::from_millis(400));
        assert!(count <= 12, "expected at most 12 ticks, got {}", count);
        assert!(count >= 6, "expected at least 6 ticks, got {}", count);
    }

    #[test]
    fn test_set_interval_while_running_has_no_immediate_tick() {
        init_logging();
        let mut scheduler = TickScheduler::with_interval(30.0).unwrap();
        scheduler.start().unwrap();
        scheduler.recv().unwrap();

        scheduler.set_interval(200.0).unwrap();
        assert_eq!(
            scheduler.recv_timeout(Duration::from_millis(120)).unwrap(),
            None,
            "no tick should arrive before the new period elapses"
        );
        assert_eq!(
            scheduler.recv_timeout(Duration::from_millis(400)).unwrap(),
            Some(Tick)
        );
        assert_eq!(scheduler.interval_millis(), 200.0);
    }

    #[test]
    fn test_set_interval_while_idle_applies_on_start() {
        init_logging();
        let mut scheduler = TickScheduler::with_interval(500.0).unwrap();
        scheduler.set_interval(20.0).unwrap();
        assert_eq!(
            scheduler.recv_timeout(Duration::from_millis(60)).unwrap(),
            None
        );

        scheduler.start().unwrap();
        assert_eq!(
            scheduler.recv_timeout(Duration::from_millis(300)).unwrap(),
            Some(Tick)
        );
    }

    #[test]
    fn test_invalid_interval_keeps_ticking_at_old_period() {
        init_logging();
        let mut scheduler = TickScheduler::with_interval(20.0).unwrap();
        scheduler.start().unwrap();

        assert!(matches!(
            scheduler.send(TickCommand::SetInterval(0.0)),
            Err(MetronomeError::InvalidInterval(_))
        ));
        assert!(matches!(
            scheduler.send(TickCommand::SetInterval(-5.0)),
            Err(MetronomeError::InvalidInterval(_))
        ));
        assert!(scheduler.is_running());
        assert!(scheduler
            .recv_timeout(Duration::from_millis(300))
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_unrepresentable_interval_is_rejected() {
        init_logging();
        assert!(matches!(
            TickScheduler::with_interval(1e22),
            Err(MetronomeError::InvalidInterval(_))
        ));

        let mut scheduler = TickScheduler::with_interval(20.0).unwrap();
        scheduler.start().unwrap();
        assert!(matches!(
            scheduler.set_interval(1e22),
            Err(MetronomeError::InvalidInterval(_))
        ));
        assert_eq!(scheduler.interval_millis(), 20.0);

        // the thread is still alive and ticking at the old period
        assert!(scheduler
            .recv_timeout(Duration::from_millis(300))
            .unwrap()
            .is_some());
        scheduler.shutdown().unwrap();
    }

    #[test]
    fn test_command_messages() {
        let mut scheduler = TickScheduler::new().unwrap();
        scheduler.send(TickCommand::Start).unwrap();
        assert!(scheduler.is_running());
        scheduler.send(TickCommand::Stop).unwrap();
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_independent_schedulers() {
        init_logging();
        let mut running = TickScheduler::with_interval(10.0).unwrap();
        let idle = TickScheduler::with_interval(10.0).unwrap();
        running.start().unwrap();

        assert!(running.recv_timeout(Duration::from_millis(300)).unwrap().is_some());
        assert_eq!(idle.recv_timeout(Duration::from_millis(50)).unwrap(), None);
    }

    #[test]
    fn test_shutdown_joins_running_scheduler() {
        init_logging();
        let mut scheduler = TickScheduler::with_interval(5.0).unwrap();
        scheduler.start().unwrap();
        scheduler.recv().unwrap();

        let started = Instant::now();
        scheduler.shutdown().unwrap();
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_drop_releases_thread() {
        let mut scheduler = TickScheduler::with_interval(5.0).unwrap();
        scheduler.start().unwrap();
        drop(scheduler);
    }
}
