//! Background tick scheduler
//!
//! A [`TickScheduler`] owns a dedicated thread that keeps one periodic timer.
//! The controller drives it with [`TickCommand`]s over an ordered channel and
//! reads [`Tick`]s back from a second channel. Commands are applied one at a
//! time in arrival order; nothing is shared between the two threads.
//!
//! Ticks carry no payload. Internally each one is stamped with the stop epoch
//! it was emitted under, so ticks still in the channel when [`TickScheduler::stop`]
//! is called are discarded rather than delivered.
//!
mod session;
mod worker;

pub use session::{DEFAULT_INTERVAL_MS, MAX_INTERVAL_MS};

use crate::error::{MetronomeError, Result};
use crossbeam::channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use log::{error, info};
use session::{validate_interval, TimerSession};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use worker::{Command, TickSignal};

/// One elapsed scheduler period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick;

/// Inbound control messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickCommand {
    /// Begin ticking; ignored while already running
    Start,
    /// Halt ticking; ignored while idle
    Stop,
    /// Replace the tick period, in milliseconds
    SetInterval(f64),
}

pub struct TickScheduler {
    command_tx: Sender<Command>,
    tick_rx: Receiver<TickSignal>,
    epoch: u64,
    running: bool,
    period_millis: f64,
    thread: Option<JoinHandle<()>>,
}

impl TickScheduler {
    /// Spawns an idle scheduler with the default 25 ms period
    pub fn new() -> Result<Self> {
        Self::with_interval(DEFAULT_INTERVAL_MS)
    }

    /// Spawns an idle scheduler with the given period in milliseconds
    pub fn with_interval(period_millis: f64) -> Result<Self> {
        let session = TimerSession::new(period_millis)?;
        let (command_tx, command_rx) = unbounded();
        let (tick_tx, tick_rx) = unbounded();

        let thread = thread::Builder::new()
            .name("tick-scheduler".to_string())
            .spawn(move || worker::run(session, command_rx, tick_tx))?;
        info!("Spawned tick scheduler with period {} ms", period_millis);

        Ok(Self {
            command_tx,
            tick_rx,
            epoch: 0,
            running: false,
            period_millis,
            thread: Some(thread),
        })
    }

    pub fn send(&mut self, command: TickCommand) -> Result<()> {
        match command {
            TickCommand::Start => self.start(),
            TickCommand::Stop => self.stop(),
            TickCommand::SetInterval(period_millis) => self.set_interval(period_millis),
        }
    }

    pub fn start(&mut self) -> Result<()> {
        self.dispatch(Command::Start)?;
        self.running = true;
        Ok(())
    }

    /// Halts ticking. No tick is returned by the receive methods after this
    /// call, even if some were already queued.
    pub fn stop(&mut self) -> Result<()> {
        self.epoch += 1;
        self.running = false;
        self.dispatch(Command::Stop { epoch: self.epoch })
    }

    /// Changes the period. When running, the timer is re-armed and the next
    /// tick arrives one full new period later.
    pub fn set_interval(&mut self, period_millis: f64) -> Result<()> {
        validate_interval(period_millis)?;
        self.dispatch(Command::SetInterval(period_millis))?;
        self.period_millis = period_millis;
        Ok(())
    }

    /// Whether the last transport command sent was a start
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval_millis(&self) -> f64 {
        self.period_millis
    }

    /// Blocks until the next tick
    pub fn recv(&self) -> Result<Tick> {
        loop {
            let signal = self
                .tick_rx
                .recv()
                .map_err(|_| MetronomeError::Disconnected)?;
            if self.is_current(signal) {
                return Ok(Tick);
            }
        }
    }

    /// Waits up to `timeout` for a tick
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<Tick>> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.tick_rx.recv_deadline(deadline) {
                Ok(signal) if self.is_current(signal) => return Ok(Some(Tick)),
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout) => return Ok(None),
                Err(RecvTimeoutError::Disconnected) => return Err(MetronomeError::Disconnected),
            }
        }
    }

    pub fn try_recv(&self) -> Result<Option<Tick>> {
        loop {
            match self.tick_rx.try_recv() {
                Ok(signal) if self.is_current(signal) => return Ok(Some(Tick)),
                Ok(_) => continue,
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => return Err(MetronomeError::Disconnected),
            }
        }
    }

    /// Stops the thread and waits for it to exit
    pub fn shutdown(mut self) -> Result<()> {
        if self.teardown() {
            Ok(())
        } else {
            Err(MetronomeError::Disconnected)
        }
    }

    fn is_current(&self, signal: TickSignal) -> bool {
        signal.epoch == self.epoch
    }

    fn dispatch(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| MetronomeError::Disconnected)
    }

    fn teardown(&mut self) -> bool {
        let Some(thread) = self.thread.take() else {
            return true;
        };
        // the thread also exits on its own if it already saw a disconnect
        let _ = self.command_tx.send(Command::Shutdown);
        match thread.join() {
            Ok(()) => {
                info!("Tick scheduler thread joined");
                true
            }
            Err(_) => {
                error!("Tick scheduler thread panicked");
                false
            }
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.teardown();
    }
}
