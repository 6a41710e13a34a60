use super::session::TimerSession;
use crossbeam::channel::{Receiver, RecvTimeoutError, Sender};
use log::{debug, error, info, trace, warn};
use std::time::Instant;

/// Messages from the handle to the scheduler thread
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Command {
    Start,
    Stop { epoch: u64 },
    SetInterval(f64),
    Shutdown,
}

/// A tick as it travels over the channel, stamped with the stop epoch it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct TickSignal {
    pub epoch: u64,
}

/// Runs the scheduler loop until shutdown or until the handle goes away
pub(super) fn run(mut session: TimerSession, commands: Receiver<Command>, ticks: Sender<TickSignal>) {
    info!(
        "Tick scheduler thread started with period {} ms",
        session.period_millis()
    );

    loop {
        let received = match session.deadline() {
            Some(deadline) => commands.recv_deadline(deadline),
            None => commands.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(command) => {
                if !handle_command(&mut session, command) {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => fire(&mut session, &ticks),
            Err(RecvTimeoutError::Disconnected) => {
                session.disarm();
                info!("Command channel closed, tick scheduler exiting");
                break;
            }
        }
    }
}

/// Applies one command. Returns false once the loop should exit.
fn handle_command(session: &mut TimerSession, command: Command) -> bool {
    let now = Instant::now();
    match command {
        Command::Start => {
            if session.arm(now) {
                info!("Tick scheduler started at {} ms", session.period_millis());
            } else {
                debug!("Start ignored, tick scheduler already running");
            }
        }
        Command::Stop { epoch } => {
            session.set_epoch(epoch);
            if session.disarm() {
                info!("Tick scheduler stopped");
            } else {
                debug!("Stop ignored, tick scheduler already idle");
            }
        }
        Command::SetInterval(period_millis) => match session.set_period(period_millis, now) {
            Ok(()) => debug!(
                "Tick interval set to {} ms (running: {})",
                period_millis,
                session.is_running()
            ),
            Err(e) => error!("Rejected interval command: {}", e),
        },
        Command::Shutdown => {
            session.disarm();
            info!("Tick scheduler shutting down");
            return false;
        }
    }
    true
}

fn fire(session: &mut TimerSession, ticks: &Sender<TickSignal>) {
    let now = Instant::now();
    let signal = TickSignal {
        epoch: session.epoch(),
    };

    if ticks.send(signal).is_err() {
        warn!("Tick receiver dropped, disarming timer");
        session.disarm();
        return;
    }
    trace!("Tick emitted (epoch {})", signal.epoch);

    let skipped = session.advance(now);
    if skipped > 0 {
        debug!("Tick scheduler fell behind, skipped {} period(s)", skipped);
    }
}
