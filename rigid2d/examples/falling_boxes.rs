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
//! Headless falling boxes demo
//!
//! Lays out a row of pinned boxes, drags one onto its neighbour, releases
//! a few, and drives the frame pipeline while printing what a renderer
//! would draw.

use std::thread;
use std::time::Duration;

use rigid2d::input::{Button, PointerInput};
use rigid2d::layout::WorldLayout;
use rigid2d::math::Vec2;
use rigid2d::{FramePipeline, PipelineConfig, SharedWorld, Simulation};

const FRAMES: u64 = 30;

fn main() -> Result<(), String> {
    println!("rigid2d - Falling Boxes");
    println!("=======================\n");

    let layout = WorldLayout::default();
    let world = layout.generate(&mut rand::thread_rng())?;
    println!(
        "Generated {} boxes of size {} with spacing {:.2}",
        world.body_count(),
        layout.body_size,
        layout.spacing()
    );

    let shared = SharedWorld::new(Simulation::with_defaults(world));
    let mut pointer = PointerInput::new(shared.clone());

    // Drag the first box onto the second one
    let snapshot = shared.snapshot();
    let first = snapshot.bodies()[0].position;
    let second = snapshot.bodies()[1].position;
    if let Some(id) = pointer.press(first) {
        pointer.move_to(second);
        pointer.release(Button::Primary);
        println!("Dragged {} from ({:.1}, {:.1}) to ({:.1}, {:.1})", id, first.x, first.y, second.x, second.y);
    }

    // Unpin every other box with a secondary click
    for body in snapshot.bodies().iter().skip(2).step_by(2) {
        pointer.press(body.position);
        if let Some(pinned) = pointer.release(Button::Secondary) {
            println!("{} pinned: {}", body.id, pinned);
        }
        pointer.release(Button::Primary);
    }
    println!();

    let mut pipeline = FramePipeline::spawn(shared, PipelineConfig::default())?;
    for _ in 0..FRAMES {
        let ready = pipeline.run_frame(|snapshot| {
            let colliding: Vec<String> = snapshot.colliding().map(|b| b.id.to_string()).collect();
            let lowest = snapshot
                .bodies()
                .iter()
                .map(|b| b.position.y)
                .fold(f64::INFINITY, f64::min);
            println!(
                "Frame {:>3}: lowest y = {:>8.2}, colliding: [{}]",
                snapshot.frame(),
                lowest,
                colliding.join(", ")
            );
            // Stand-in for drawing
            thread::sleep(Duration::from_millis(16));
        })?;

        if ready.report.elapsed > 0.0 {
            log_report(ready.frame, ready.report.elapsed, ready.report.integrated);
        }
    }

    let final_snapshot = pipeline.world().snapshot();
    pipeline.shutdown()?;

    println!("\nFinal positions:");
    for body in final_snapshot.bodies() {
        let marker = if body.pinned { " (pinned)" } else { "" };
        println!("  {}: {}{}", body.id, format_position(body.position), marker);
    }
    Ok(())
}

fn log_report(frame: u64, elapsed: f64, integrated: usize) {
    if frame % 10 == 0 {
        println!("  stepped {:.3}s, {} bodies moved", elapsed, integrated);
    }
}

fn format_position(p: Vec2) -> String {
    format!("({:.1}, {:.1})", p.x, p.y)
}
