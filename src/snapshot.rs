use crate::creature::BehaviorState;
use crate::genetics::Diet;
use glam::Vec2;

/// What a presentation layer needs to draw one creature for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CreatureSnapshot {
    pub position: Vec2,
    pub heading: f32,
    pub scale: f32,
    pub behavior: BehaviorState,
    pub diet: Diet,
}

// --- GPU Data Structure ---
// Flat per-instance record for hosts that upload creatures to a vertex or
// storage buffer. `repr(C)` keeps the layout stable for shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CreatureInstance {
    pub world_position: [f32; 2],
    pub heading: f32,
    pub scale: f32,
    pub diet: u32,
    pub behavior: u32,
    pub frame: u32,
    pub _padding: u32,
}

impl CreatureInstance {
    pub fn new(snapshot: &CreatureSnapshot, frame: usize) -> Self {
        Self {
            world_position: snapshot.position.into(),
            heading: snapshot.heading,
            scale: snapshot.scale,
            diet: diet_index(snapshot.diet),
            behavior: behavior_index(snapshot.behavior),
            frame: frame as u32,
            _padding: 0,
        }
    }
}

fn diet_index(diet: Diet) -> u32 {
    match diet {
        Diet::Herbivore => 0,
        Diet::Carnivorous => 1,
        Diet::Sun => 2,
    }
}

fn behavior_index(behavior: BehaviorState) -> u32 {
    match behavior {
        BehaviorState::Idle => 0,
        BehaviorState::Walking => 1,
        BehaviorState::Eating => 2,
        BehaviorState::Sleeping => 3,
        BehaviorState::Dying => 4,
    }
}
