// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Frame pipeline between the simulation thread and the render side
//!
//! Stepping and rendering alternate as a two-stage pipeline:
//!
//! ```text
//! begin_frame ──(elapsed)──▶ simulation thread ──(FrameReady)──▶ wait_frame
//!      ▲                                                              │
//!      └────────────── end_frame (frame time measured) ◀── render ────┘
//! ```
//!
//! Each direction is a bounded channel of depth one, and an explicit
//! [`PipelineState`] rejects calls made out of turn: a step is never
//! requested while the previous frame is unconsumed, and a frame is never
//! rendered before its step completed.
//!
//! The wall-clock time between `begin_frame` and `end_frame` becomes the
//! next step's duration after scaling by [`PipelineConfig::time_scale`].

use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::PipelineConfig;
use crate::shared::{SharedWorld, WorldSnapshot};
use crate::simulation::StepReport;
use log::{debug, info, warn};

/// Notification that a step finished and its snapshot is published
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReady {
    /// Number of the completed step
    pub frame: u64,
    /// Summary of the step
    pub report: StepReport,
}

/// Where the pipeline is within the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Ready to request the next step
    Idle,
    /// A step was requested and its notification not yet received
    Stepping,
    /// The step completed and the frame is being drawn
    Rendering,
}

/// Turns measured frame times into step durations
///
/// The first frame has no measurement and steps by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePacer {
    time_scale: f64,
    frame_time: f64,
}

impl FramePacer {
    /// Create a pacer with the given time scale
    pub fn new(time_scale: f64) -> Self {
        FramePacer {
            time_scale,
            frame_time: 0.0,
        }
    }

    /// Duration to simulate in the next step
    pub fn next_elapsed(&self) -> f64 {
        self.frame_time * self.time_scale
    }

    /// Last measured frame time in seconds
    pub fn frame_time(&self) -> f64 {
        self.frame_time
    }

    /// Record the wall-clock duration of a finished frame
    pub fn record(&mut self, frame_time: Duration) {
        self.frame_time = frame_time.as_secs_f64();
    }
}

/// Owner of the simulation thread and the pacing loop
///
/// Dropping the pipeline closes the request channel and joins the thread.
pub struct FramePipeline {
    world: SharedWorld,
    requests: Option<SyncSender<f64>>,
    frames: Receiver<FrameReady>,
    worker: Option<JoinHandle<()>>,
    state: PipelineState,
    pacer: FramePacer,
    frame_started: Option<Instant>,
}

impl FramePipeline {
    /// Spawn the simulation thread for `world`
    pub fn spawn(world: SharedWorld, config: PipelineConfig) -> Result<Self, String> {
        config.validate()?;

        let (request_tx, request_rx) = mpsc::sync_channel::<f64>(1);
        let (frame_tx, frame_rx) = mpsc::sync_channel::<FrameReady>(1);

        let worker_world = world.clone();
        let worker = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || run_simulation(worker_world, request_rx, frame_tx))
            .map_err(|e| format!("Failed to spawn simulation thread: {}", e))?;

        info!("Simulation thread '{}' started", config.thread_name);

        Ok(FramePipeline {
            world,
            requests: Some(request_tx),
            frames: frame_rx,
            worker: Some(worker),
            state: PipelineState::Idle,
            pacer: FramePacer::new(config.time_scale),
            frame_started: None,
        })
    }

    /// The shared world driven by this pipeline
    pub fn world(&self) -> &SharedWorld {
        &self.world
    }

    /// Current pipeline state
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Pacing state
    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    /// Request the next step, returns the duration it will simulate
    pub fn begin_frame(&mut self) -> Result<f64, String> {
        if self.state != PipelineState::Idle {
            return Err(format!("Cannot begin a frame while {:?}", self.state));
        }
        let requests = self
            .requests
            .as_ref()
            .ok_or_else(|| "Pipeline is shut down".to_string())?;

        let elapsed = self.pacer.next_elapsed();
        self.frame_started = Some(Instant::now());
        requests
            .send(elapsed)
            .map_err(|_| "Simulation thread terminated".to_string())?;
        self.state = PipelineState::Stepping;
        Ok(elapsed)
    }

    /// Block until the requested step completes
    pub fn wait_frame(&mut self) -> Result<FrameReady, String> {
        if self.state != PipelineState::Stepping {
            return Err(format!("No step in flight while {:?}", self.state));
        }
        let ready = self
            .frames
            .recv()
            .map_err(|_| "Simulation thread terminated".to_string())?;
        self.state = PipelineState::Rendering;
        Ok(ready)
    }

    /// Report that the frame was drawn, returns the measured frame time
    pub fn end_frame(&mut self) -> Result<f64, String> {
        if self.state != PipelineState::Rendering {
            return Err(format!("Cannot end a frame while {:?}", self.state));
        }
        let frame_time = self
            .frame_started
            .take()
            .map(|started| started.elapsed())
            .unwrap_or_default();
        self.pacer.record(frame_time);
        self.state = PipelineState::Idle;
        Ok(self.pacer.frame_time())
    }

    /// Run one full frame, handing the fresh snapshot to `render`
    pub fn run_frame<F>(&mut self, render: F) -> Result<FrameReady, String>
    where
        F: FnOnce(&WorldSnapshot),
    {
        self.begin_frame()?;
        let ready = self.wait_frame()?;
        render(&self.world.snapshot());
        self.end_frame()?;
        Ok(ready)
    }

    /// Stop the simulation thread and wait for it to exit
    pub fn shutdown(mut self) -> Result<(), String> {
        self.stop()
    }

    fn stop(&mut self) -> Result<(), String> {
        self.requests = None;
        match self.worker.take() {
            Some(worker) => worker
                .join()
                .map_err(|_| "Simulation thread panicked".to_string()),
            None => Ok(()),
        }
    }
}

impl Drop for FramePipeline {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("{}", e);
        }
    }
}

fn run_simulation(world: SharedWorld, requests: Receiver<f64>, frames: SyncSender<FrameReady>) {
    for elapsed in requests {
        let report = world.step(elapsed);
        if frames.send(FrameReady { frame: report.frame, report }).is_err() {
            debug!("Frame receiver dropped");
            break;
        }
    }
    info!("Simulation thread stopped");
}
